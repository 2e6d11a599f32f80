use tracing_subscriber::EnvFilter;

use crate::analyzers::QualityChecker;
use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::ValidationOutcome;
use crate::processors::{Extractor, Loader, Transformer};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);
    let config = cli.pipeline_config();

    match cli.command {
        Commands::Run => {
            run_extract(&config)?;
            run_transform(&config)?;
            run_load(&config)?;
            run_validate(&config)?;
            println!("\nPipeline complete!");
        }
        Commands::Extract => run_extract(&config)?,
        Commands::Transform => run_transform(&config)?,
        Commands::Load => run_load(&config)?,
        Commands::Validate => run_validate(&config)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_extract(config: &PipelineConfig) -> Result<()> {
    println!("Extracting weather readings...");

    let report = Extractor::new(config).run()?;

    println!("Extracted {} records from {}", report.records, report.source);
    println!("Raw artifact: {}", report.artifact.display());
    Ok(())
}

fn run_transform(config: &PipelineConfig) -> Result<()> {
    println!("Transforming raw readings...");

    let summary = Transformer::new(config).run()?;

    println!(
        "Transformation complete: {} of {} rows kept",
        summary.rows_written, summary.rows_read
    );
    println!("  dropped (missing fields): {}", summary.dropped_incomplete);
    println!(
        "  dropped (temperature out of range): {}",
        summary.dropped_out_of_range
    );
    if !summary.city_stats.is_empty() {
        println!("City temperature aggregates:");
        for (city, stats) in &summary.city_stats {
            println!(
                "  {}: mean={:.2}°C min={:.2}°C max={:.2}°C",
                city, stats.mean, stats.min, stats.max
            );
        }
    }
    println!("Transformed artifact: {}", summary.artifact.display());
    Ok(())
}

fn run_load(config: &PipelineConfig) -> Result<()> {
    println!("Loading processed data...");

    let metrics = Loader::new(config).run()?;

    println!("Snapshot: {}", metrics.snapshot.display());
    println!("Latest:   {}", metrics.latest.display());
    println!("Run metrics:");
    for line in metrics.summary().lines() {
        println!("  {}", line);
    }
    Ok(())
}

fn run_validate(config: &PipelineConfig) -> Result<()> {
    println!("Validating data quality...");

    match QualityChecker::new(config).run()? {
        ValidationOutcome::Scored(report) => {
            println!("Quality report:");
            for line in report.summary().lines() {
                println!("  {}", line);
            }
            println!("Data quality: {}", report.rating());
        }
        ValidationOutcome::SourceMissing { path } => {
            println!("Validation skipped: latest snapshot not found at {}", path.display());
        }
    }
    Ok(())
}
