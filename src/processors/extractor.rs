use std::fs;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{DataSource, ExtractionReport, FallbackReason};
use crate::sources::{SheetTable, SheetsClient, SyntheticGenerator};
use crate::writers::ArtifactWriter;

/// Extraction stage: remote spreadsheet first, synthetic data on any
/// remote-source problem. Only a failure to write the raw artifact is an
/// error; everything upstream of the write degrades to the fallback.
pub struct Extractor<'a> {
    config: &'a PipelineConfig,
}

impl<'a> Extractor<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<ExtractionReport> {
        fs::create_dir_all(&self.config.work_dir)?;
        let artifact = self.config.raw_data_path();
        let writer = ArtifactWriter::new();

        match self.fetch_remote() {
            Ok(table) => {
                info!(records = table.rows.len(), "extracted rows from Google Sheets");
                writer.write_table(&artifact, &table.headers, &table.rows)?;
                info!(path = %artifact.display(), "raw artifact written");

                Ok(ExtractionReport {
                    records: table.rows.len(),
                    artifact,
                    source: DataSource::GoogleSheets,
                })
            }
            Err(reason) => {
                warn!(%reason, "remote source unavailable, falling back to synthetic data");
                let readings = SyntheticGenerator::new().generate();
                writer.write_readings(&artifact, &readings)?;
                info!(
                    records = readings.len(),
                    path = %artifact.display(),
                    "synthetic raw artifact written"
                );

                Ok(ExtractionReport {
                    records: readings.len(),
                    artifact,
                    source: DataSource::Synthetic { reason },
                })
            }
        }
    }

    /// Walk the remote chain; the first broken link names the fallback.
    fn fetch_remote(&self) -> std::result::Result<SheetTable, FallbackReason> {
        if !self.config.credentials_exist() {
            return Err(FallbackReason::CredentialsMissing(
                self.config.credentials_path.clone(),
            ));
        }

        let sheet_id = self
            .config
            .sheet_id
            .as_deref()
            .ok_or(FallbackReason::SheetIdUnconfigured)?;

        let client = SheetsClient::from_credentials(&self.config.credentials_path)
            .map_err(|e| FallbackReason::RemoteAccess(e.to_string()))?;

        client
            .fetch_rows(sheet_id)
            .map_err(|e| FallbackReason::RemoteAccess(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::ArtifactReader;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> PipelineConfig {
        PipelineConfig::new()
            .with_work_dir(dir.path())
            .with_processed_dir(dir.path().join("processed"))
            .with_credentials_path(dir.path().join("credentials.json"))
    }

    #[test]
    fn test_missing_credentials_fall_back_to_synthetic() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir).with_sheet_id(Some("sheet123".to_string()));

        let report = Extractor::new(&config).run().unwrap();

        assert!(matches!(
            report.source,
            DataSource::Synthetic {
                reason: FallbackReason::CredentialsMissing(_)
            }
        ));
        assert_eq!(report.records, 30);
        assert!(report.artifact.is_file());
    }

    #[test]
    fn test_unconfigured_sheet_id_falls_back() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir).with_sheet_id(None);
        std::fs::write(&config.credentials_path, "{}").unwrap();

        let report = Extractor::new(&config).run().unwrap();

        assert!(matches!(
            report.source,
            DataSource::Synthetic {
                reason: FallbackReason::SheetIdUnconfigured
            }
        ));
    }

    #[test]
    fn test_unusable_credentials_fall_back() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir).with_sheet_id(Some("sheet123".to_string()));
        std::fs::write(&config.credentials_path, "not json").unwrap();

        let report = Extractor::new(&config).run().unwrap();

        assert!(matches!(
            report.source,
            DataSource::Synthetic {
                reason: FallbackReason::RemoteAccess(_)
            }
        ));
    }

    #[test]
    fn test_fallback_artifact_is_readable_and_complete() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let report = Extractor::new(&config).run().unwrap();
        let readings = ArtifactReader::new().read_readings(&report.artifact).unwrap();

        assert_eq!(readings.len(), 30);
        assert!(readings.iter().all(|r| r.is_complete()));
    }
}
