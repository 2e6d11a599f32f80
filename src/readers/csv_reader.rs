use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::WeatherReading;

/// Untyped view of an artifact: header row plus data rows as read.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Reads stage artifacts back in, typed or untyped.
pub struct ArtifactReader;

impl ArtifactReader {
    pub fn new() -> Self {
        Self
    }

    /// Read an artifact as typed readings. Empty cells and absent columns
    /// deserialize to `None`.
    pub fn read_readings(&self, path: &Path) -> Result<Vec<WeatherReading>> {
        let mut reader = ReaderBuilder::new().from_path(path)?;
        let mut readings = Vec::new();

        for row in reader.deserialize() {
            readings.push(row?);
        }

        Ok(readings)
    }

    /// Read an artifact without interpreting its columns.
    pub fn read_table(&self, path: &Path) -> Result<RawTable> {
        let content = fs::read(path)?;
        self.parse_table(&content)
    }

    /// Parse already-loaded artifact bytes without interpreting columns.
    pub fn parse_table(&self, content: &[u8]) -> Result<RawTable> {
        let mut reader = ReaderBuilder::new().from_reader(content);
        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();

        for row in reader.records() {
            rows.push(row?);
        }

        Ok(RawTable { headers, rows })
    }
}

impl Default for ArtifactReader {
    fn default() -> Self {
        Self::new()
    }
}
