use std::env;
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_CREDENTIALS_FILE, DEFAULT_PROCESSED_DIR, LATEST_DATA_FILE, RAW_DATA_FILE,
    SHEET_ID_ENV, TRANSFORMED_DATA_FILE,
};

/// Paths and source settings for one pipeline run.
///
/// Artifact locations are derived from the configured directories, so two
/// runs pointed at different working directories cannot race on the same
/// intermediate files.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the two ephemeral stage artifacts.
    pub work_dir: PathBuf,
    /// Destination for versioned snapshots and the latest pointer.
    pub processed_dir: PathBuf,
    /// Service-account credential file for the spreadsheet source.
    pub credentials_path: PathBuf,
    /// Spreadsheet identifier; `None` routes extraction to synthetic data.
    pub sheet_id: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_dir: env::temp_dir(),
            processed_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            sheet_id: env::var(SHEET_ID_ENV).ok().filter(|id| !id.is_empty()),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn with_processed_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.processed_dir = dir.into();
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    pub fn with_sheet_id(mut self, sheet_id: Option<String>) -> Self {
        self.sheet_id = sheet_id.filter(|id| !id.is_empty());
        self
    }

    pub fn raw_data_path(&self) -> PathBuf {
        self.work_dir.join(RAW_DATA_FILE)
    }

    pub fn transformed_data_path(&self) -> PathBuf {
        self.work_dir.join(TRANSFORMED_DATA_FILE)
    }

    pub fn latest_data_path(&self) -> PathBuf {
        self.processed_dir.join(LATEST_DATA_FILE)
    }

    pub fn snapshot_path(&self, filename: &str) -> PathBuf {
        self.processed_dir.join(filename)
    }

    pub fn credentials_exist(&self) -> bool {
        self.credentials_path.is_file()
    }
}
