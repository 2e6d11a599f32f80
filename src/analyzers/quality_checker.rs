use std::collections::HashSet;
use tracing::{info, warn};
use validator::Validate;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{QualityReport, ValidationOutcome, WeatherReading};
use crate::readers::ArtifactReader;
use crate::utils::constants::{
    DUPLICATE_ROWS_PENALTY, HUMIDITY_OUT_OF_RANGE_PENALTY, NULL_VALUES_PENALTY,
    TEMP_OUT_OF_RANGE_PENALTY,
};

/// Validation stage: score the latest snapshot against four data-quality
/// checks. Each violated category costs a flat deduction regardless of how
/// many rows violate it.
pub struct QualityChecker<'a> {
    config: &'a PipelineConfig,
}

impl<'a> QualityChecker<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<ValidationOutcome> {
        let path = self.config.latest_data_path();
        if !path.is_file() {
            warn!(path = %path.display(), "latest snapshot not found, nothing to validate");
            return Ok(ValidationOutcome::SourceMissing { path });
        }

        let table = ArtifactReader::new().read_table(&path)?;
        info!(rows = table.len(), path = %path.display(), "latest snapshot read");

        let mut null_values = 0;
        let mut duplicate_rows = 0;
        let mut temperature_out_of_range = 0;
        let mut humidity_out_of_range = 0;
        let mut seen: HashSet<Vec<String>> = HashSet::new();

        for row in &table.rows {
            null_values += row.iter().filter(|cell| cell.is_empty()).count();

            let key: Vec<String> = row.iter().map(str::to_string).collect();
            if !seen.insert(key) {
                duplicate_rows += 1;
            }

            // Unparsable cells fall out of the range checks rather than
            // failing the stage; structural CSV errors still propagate.
            if let Ok(reading) = row.deserialize::<WeatherReading>(Some(&table.headers)) {
                if let Err(errors) = reading.validate() {
                    let fields = errors.field_errors();
                    if fields.contains_key("temperature_celsius") {
                        temperature_out_of_range += 1;
                    }
                    if fields.contains_key("humidity") {
                        humidity_out_of_range += 1;
                    }
                }
            }
        }

        let mut score = 100i32;
        if null_values > 0 {
            score -= NULL_VALUES_PENALTY;
        }
        if duplicate_rows > 0 {
            score -= DUPLICATE_ROWS_PENALTY;
        }
        if temperature_out_of_range > 0 {
            score -= TEMP_OUT_OF_RANGE_PENALTY;
        }
        if humidity_out_of_range > 0 {
            score -= HUMIDITY_OUT_OF_RANGE_PENALTY;
        }

        let report = QualityReport {
            total_records: table.len(),
            null_values,
            duplicate_rows,
            temperature_out_of_range,
            humidity_out_of_range,
            quality_score: score.max(0),
        };
        info!(
            score = report.quality_score,
            rating = %report.rating(),
            "data quality assessed"
        );

        Ok(ValidationOutcome::Scored(report))
    }
}
