use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::PipelineConfig;

#[derive(Parser)]
#[command(name = "weather-etl")]
#[command(about = "Weather data ETL pipeline with quality scoring")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Directory for intermediate artifacts [default: OS temp dir]"
    )]
    pub work_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Directory for persisted snapshots [default: data/processed]"
    )]
    pub processed_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Service-account credential file")]
    pub credentials: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "GOOGLE_SHEET_ID",
        help = "Source spreadsheet identifier"
    )]
    pub sheet_id: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: extract, transform, load, validate
    Run,

    /// Extract raw readings into the working directory
    Extract,

    /// Clean and enrich the raw artifact
    Transform,

    /// Persist the transformed artifact and report run metrics
    Load,

    /// Score the latest snapshot for data quality
    Validate,
}

impl Cli {
    /// Fold CLI overrides onto the defaults.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new();

        if let Some(dir) = &self.work_dir {
            config = config.with_work_dir(dir);
        }
        if let Some(dir) = &self.processed_dir {
            config = config.with_processed_dir(dir);
        }
        if let Some(path) = &self.credentials {
            config = config.with_credentials_path(path);
        }
        if self.sheet_id.is_some() {
            config = config.with_sheet_id(self.sheet_id.clone());
        }

        config
    }
}
