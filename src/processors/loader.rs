use chrono::Local;
use std::collections::HashSet;
use std::fs;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{round2, LoadMetrics};
use crate::readers::{ArtifactReader, RawTable};
use crate::utils::generate_snapshot_filename;

/// Load stage: persist the transformed artifact as an immutable timestamped
/// snapshot plus a mutable latest copy, then report run metrics. Both
/// outputs are written from the same buffer, so they cannot diverge.
pub struct Loader<'a> {
    config: &'a PipelineConfig,
}

impl<'a> Loader<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<LoadMetrics> {
        let input = self.config.transformed_data_path();
        let content = fs::read(&input)?;

        fs::create_dir_all(&self.config.processed_dir)?;
        let snapshot = self.config.snapshot_path(&generate_snapshot_filename());
        let latest = self.config.latest_data_path();
        fs::write(&snapshot, &content)?;
        fs::write(&latest, &content)?;
        info!(
            snapshot = %snapshot.display(),
            latest = %latest.display(),
            "snapshot and latest copies written"
        );

        let table = ArtifactReader::new().parse_table(&content)?;
        let file_size_kb = round2(fs::metadata(&snapshot)?.len() as f64 / 1024.0);

        let metrics = LoadMetrics {
            records_processed: table.len(),
            cities_count: distinct_cities(&table),
            avg_temperature: mean_temperature(&table),
            processing_time: Local::now().to_rfc3339(),
            file_size_kb,
            snapshot,
            latest,
        };
        info!(
            records = metrics.records_processed,
            cities = metrics.cities_count,
            avg_temperature = metrics.avg_temperature,
            "load metrics computed"
        );

        Ok(metrics)
    }
}

/// Distinct non-empty city values; 0 when the column is absent.
fn distinct_cities(table: &RawTable) -> usize {
    match table.column_index("ciudad") {
        Some(idx) => table
            .rows
            .iter()
            .filter_map(|row| row.get(idx))
            .filter(|city| !city.is_empty())
            .collect::<HashSet<_>>()
            .len(),
        None => 0,
    }
}

/// Mean Celsius over parsable cells, rounded to 2 decimals; 0 when the
/// column is absent or carries no values.
fn mean_temperature(table: &RawTable) -> f64 {
    let Some(idx) = table.column_index("temperatura_celsius") else {
        return 0.0;
    };

    let temps: Vec<f64> = table
        .rows
        .iter()
        .filter_map(|row| row.get(idx))
        .filter_map(|cell| cell.parse().ok())
        .collect();

    if temps.is_empty() {
        return 0.0;
    }

    round2(temps.iter().sum::<f64>() / temps.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> PipelineConfig {
        PipelineConfig::new()
            .with_work_dir(dir.path())
            .with_processed_dir(dir.path().join("processed"))
    }

    fn write_transformed(config: &PipelineConfig, content: &str) {
        fs::write(config.transformed_data_path(), content).unwrap();
    }

    #[test]
    fn test_snapshot_and_latest_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_transformed(
            &config,
            "ciudad,temperatura_celsius\nCali,28.0\nBogotá,16.5\n",
        );

        let metrics = Loader::new(&config).run().unwrap();

        let snapshot = fs::read(&metrics.snapshot).unwrap();
        let latest = fs::read(&metrics.latest).unwrap();
        assert_eq!(snapshot, latest);
        assert_eq!(metrics.latest, config.latest_data_path());
    }

    #[test]
    fn test_metrics() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_transformed(
            &config,
            "ciudad,temperatura_celsius\nCali,28.0\nCali,30.0\nBogotá,17.0\n",
        );

        let metrics = Loader::new(&config).run().unwrap();

        assert_eq!(metrics.records_processed, 3);
        assert_eq!(metrics.cities_count, 2);
        assert_eq!(metrics.avg_temperature, 25.0);
        assert!(metrics.file_size_kb > 0.0);
        assert!(!metrics.processing_time.is_empty());
    }

    #[test]
    fn test_missing_columns_degrade_to_zero() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_transformed(&config, "humedad,presion_atmosferica\n70,1013\n");

        let metrics = Loader::new(&config).run().unwrap();

        assert_eq!(metrics.records_processed, 1);
        assert_eq!(metrics.cities_count, 0);
        assert_eq!(metrics.avg_temperature, 0.0);
    }

    #[test]
    fn test_missing_input_artifact_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        assert!(Loader::new(&config).run().is_err());
    }

    #[test]
    fn test_zero_row_artifact_loads() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_transformed(&config, "ciudad,temperatura_celsius\n");

        let metrics = Loader::new(&config).run().unwrap();

        assert_eq!(metrics.records_processed, 0);
        assert_eq!(metrics.cities_count, 0);
        assert_eq!(metrics.avg_temperature, 0.0);
    }
}
