use chrono::Local;
use std::collections::BTreeMap;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{
    round2, CityTemperatureStats, EnrichedReading, TransformSummary, WeatherReading,
};
use crate::readers::ArtifactReader;
use crate::utils::constants::OBSERVATION_TIMESTAMP_FORMAT;
use crate::writers::ArtifactWriter;

/// Transformation stage. Cleaning and enrichment run in a fixed order, each
/// step on the survivors of the previous one: drop incomplete rows, stamp
/// the batch, filter implausible temperatures, derive Fahrenheit, heat
/// index and category, then log per-city aggregates.
pub struct Transformer<'a> {
    config: &'a PipelineConfig,
}

impl<'a> Transformer<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<TransformSummary> {
        let input = self.config.raw_data_path();
        let readings = ArtifactReader::new().read_readings(&input)?;
        let rows_read = readings.len();
        info!(rows = rows_read, path = %input.display(), "raw artifact read");

        let complete: Vec<WeatherReading> = readings
            .into_iter()
            .filter(WeatherReading::is_complete)
            .collect();
        let dropped_incomplete = rows_read - complete.len();
        info!(dropped = dropped_incomplete, "rows with missing fields removed");

        let processed_at = Local::now().format(OBSERVATION_TIMESTAMP_FORMAT).to_string();

        let complete_count = complete.len();
        let enriched: Vec<EnrichedReading> = complete
            .into_iter()
            .filter(WeatherReading::temperature_in_accepted_range)
            .filter_map(|reading| EnrichedReading::from_reading(reading, &processed_at))
            .collect();
        let dropped_out_of_range = complete_count - enriched.len();
        info!(
            dropped = dropped_out_of_range,
            "rows with out-of-range temperature removed"
        );

        let city_stats = aggregate_by_city(&enriched);
        for (city, stats) in &city_stats {
            info!(
                city = %city,
                mean = stats.mean,
                min = stats.min,
                max = stats.max,
                "city temperature aggregate"
            );
        }

        let artifact = self.config.transformed_data_path();
        ArtifactWriter::new().write_enriched(&artifact, &enriched)?;
        info!(
            rows = enriched.len(),
            path = %artifact.display(),
            "transformed artifact written"
        );

        Ok(TransformSummary {
            rows_written: enriched.len(),
            artifact,
            rows_read,
            dropped_incomplete,
            dropped_out_of_range,
            city_stats,
        })
    }
}

/// Mean/min/max Celsius per city, rounded to 2 decimals.
fn aggregate_by_city(rows: &[EnrichedReading]) -> BTreeMap<String, CityTemperatureStats> {
    let mut accumulators: BTreeMap<String, (f64, f64, f64, usize)> = BTreeMap::new();

    for row in rows {
        let entry = accumulators
            .entry(row.city.clone())
            .or_insert((0.0, f64::INFINITY, f64::NEG_INFINITY, 0));
        entry.0 += row.temperature_celsius;
        entry.1 = entry.1.min(row.temperature_celsius);
        entry.2 = entry.2.max(row.temperature_celsius);
        entry.3 += 1;
    }

    accumulators
        .into_iter()
        .map(|(city, (sum, min, max, count))| {
            (
                city,
                CityTemperatureStats {
                    mean: round2(sum / count as f64),
                    min: round2(min),
                    max: round2(max),
                },
            )
        })
        .collect()
}
