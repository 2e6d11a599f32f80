use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::models::{EnrichedReading, WeatherReading};

/// Writes stage artifacts. Artifacts are replaced whole: the header row is
/// always present, even for zero data rows, so a consumer either sees a
/// complete artifact or none.
pub struct ArtifactWriter;

impl ArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write raw readings (synthetic extraction output).
    pub fn write_readings(&self, path: &Path, readings: &[WeatherReading]) -> Result<()> {
        self.write_serialized(path, &WeatherReading::COLUMNS, readings)
    }

    /// Write enriched readings (transformed artifact).
    pub fn write_enriched(&self, path: &Path, readings: &[EnrichedReading]) -> Result<()> {
        self.write_serialized(path, &EnrichedReading::COLUMNS, readings)
    }

    /// Write remote rows verbatim under the sheet's own header row. Short
    /// rows are padded to the header width.
    pub fn write_table(&self, path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(headers)?;

        for row in rows {
            let padded = headers
                .iter()
                .enumerate()
                .map(|(i, _)| row.get(i).map(String::as_str).unwrap_or(""));
            writer.write_record(padded)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_serialized<T: Serialize>(
        &self,
        path: &Path,
        columns: &[&str],
        rows: &[T],
    ) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(columns)?;

        for row in rows {
            writer.serialize(row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::ArtifactReader;

    #[test]
    fn test_zero_row_artifact_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        ArtifactWriter::new().write_enriched(&path, &[]).unwrap();

        let table = ArtifactReader::new().read_table(&path).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers.len(), EnrichedReading::COLUMNS.len());
        assert_eq!(&table.headers[12], "categoria_temperatura");
    }

    #[test]
    fn test_table_rows_padded_to_header_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");

        let headers = vec!["ciudad".to_string(), "humedad".to_string()];
        let rows = vec![vec!["Cali".to_string()]];
        ArtifactWriter::new().write_table(&path, &headers, &rows).unwrap();

        let table = ArtifactReader::new().read_table(&path).unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(&table.rows[0][1], "");
    }

    #[test]
    fn test_readings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");

        let reading = WeatherReading {
            observed_at: Some("2024-06-01 12:00:00".to_string()),
            city: Some("Medellín".to_string()),
            temperature_celsius: Some(24.5),
            humidity: Some(71.0),
            pressure: Some(1014.8),
            wind_speed: Some(9.1),
            wind_direction: Some("SW".to_string()),
            precipitation: Some(1.2),
            visibility: Some(12.3),
        };

        ArtifactWriter::new().write_readings(&path, &[reading.clone()]).unwrap();
        let back = ArtifactReader::new().read_readings(&path).unwrap();

        assert_eq!(back, vec![reading]);
    }
}
