pub mod reading;
pub mod report;

pub use reading::{
    celsius_to_fahrenheit, heat_index, EnrichedReading, TemperatureCategory, WeatherReading,
};
pub use report::{
    round2, CityTemperatureStats, DataSource, ExtractionReport, FallbackReason, LoadMetrics,
    QualityRating, QualityReport, TransformSummary, ValidationOutcome,
};
