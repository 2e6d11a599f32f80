use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Round to two decimal places, matching the precision used in run metrics.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Where the extracted rows came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    GoogleSheets,
    Synthetic { reason: FallbackReason },
}

impl DataSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataSource::Synthetic { .. })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::GoogleSheets => write!(f, "Google Sheets"),
            DataSource::Synthetic { reason } => write!(f, "synthetic data ({})", reason),
        }
    }
}

/// Why extraction fell back to synthetic data.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    CredentialsMissing(PathBuf),
    SheetIdUnconfigured,
    RemoteAccess(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::CredentialsMissing(path) => {
                write!(f, "credential file not found: {}", path.display())
            }
            FallbackReason::SheetIdUnconfigured => write!(f, "sheet id not configured"),
            FallbackReason::RemoteAccess(detail) => write!(f, "remote access failed: {}", detail),
        }
    }
}

/// Result of the extraction stage.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub artifact: PathBuf,
    pub source: DataSource,
    pub records: usize,
}

/// Per-city Celsius aggregate, logged by the transformer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityTemperatureStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Result of the transformation stage.
#[derive(Debug, Clone)]
pub struct TransformSummary {
    pub artifact: PathBuf,
    pub rows_read: usize,
    pub dropped_incomplete: usize,
    pub dropped_out_of_range: usize,
    pub rows_written: usize,
    pub city_stats: BTreeMap<String, CityTemperatureStats>,
}

/// Result of the load stage.
#[derive(Debug, Clone)]
pub struct LoadMetrics {
    pub snapshot: PathBuf,
    pub latest: PathBuf,
    pub records_processed: usize,
    pub cities_count: usize,
    pub avg_temperature: f64,
    pub processing_time: String,
    pub file_size_kb: f64,
}

impl LoadMetrics {
    pub fn summary(&self) -> String {
        format!(
            "records_processed: {}\ncities_count: {}\navg_temperature: {:.2}\nprocessing_time: {}\nfile_size_kb: {:.2}",
            self.records_processed,
            self.cities_count,
            self.avg_temperature,
            self.processing_time,
            self.file_size_kb,
        )
    }
}

/// Counters and score produced by the quality checker.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub total_records: usize,
    pub null_values: usize,
    pub duplicate_rows: usize,
    pub temperature_out_of_range: usize,
    pub humidity_out_of_range: usize,
    pub quality_score: i32,
}

impl QualityReport {
    pub fn rating(&self) -> QualityRating {
        if self.quality_score >= 80 {
            QualityRating::Excellent
        } else if self.quality_score >= 60 {
            QualityRating::Good
        } else {
            QualityRating::NeedsAttention
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "total_records: {}\nnull_values: {}\nduplicate_rows: {}\ntemperature_out_of_range: {}\nhumidity_out_of_range: {}\nquality_score: {}",
            self.total_records,
            self.null_values,
            self.duplicate_rows,
            self.temperature_out_of_range,
            self.humidity_out_of_range,
            self.quality_score,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityRating {
    Excellent,
    Good,
    NeedsAttention,
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityRating::Excellent => write!(f, "excellent"),
            QualityRating::Good => write!(f, "good"),
            QualityRating::NeedsAttention => write!(f, "needs attention"),
        }
    }
}

/// Result of the validation stage. A missing latest snapshot is reported,
/// not raised, so the caller can log it without treating the run as crashed.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Scored(QualityReport),
    SourceMissing { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_thresholds() {
        let mut report = QualityReport {
            total_records: 10,
            null_values: 0,
            duplicate_rows: 0,
            temperature_out_of_range: 0,
            humidity_out_of_range: 0,
            quality_score: 100,
        };
        assert_eq!(report.rating(), QualityRating::Excellent);

        report.quality_score = 80;
        assert_eq!(report.rating(), QualityRating::Excellent);

        report.quality_score = 65;
        assert_eq!(report.rating(), QualityRating::Good);

        report.quality_score = 59;
        assert_eq!(report.rating(), QualityRating::NeedsAttention);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(21.016), 21.02);
        assert_eq!(round2(21.004), 21.0);
        assert_eq!(round2(-3.456), -3.46);
    }
}
