use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::utils::constants::{
    HOT_THRESHOLD, MAX_ACCEPTED_TEMP, MILD_THRESHOLD, MIN_ACCEPTED_TEMP, VERY_HOT_THRESHOLD,
};

/// Raw reading as it arrives from the spreadsheet (wire format).
///
/// Every field is optional: raw artifacts hold unvalidated rows, and a cell
/// may be empty or the column absent entirely. Column names follow the
/// source sheet. The `validate` ranges express physical plausibility and are
/// consumed by the quality checker, not enforced on ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherReading {
    #[serde(rename = "fecha")]
    pub observed_at: Option<String>,

    #[serde(rename = "ciudad")]
    pub city: Option<String>,

    #[validate(range(min = -50.0, max = 60.0))]
    #[serde(rename = "temperatura_celsius")]
    pub temperature_celsius: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(rename = "humedad")]
    pub humidity: Option<f64>,

    #[serde(rename = "presion_atmosferica")]
    pub pressure: Option<f64>,

    #[serde(rename = "velocidad_viento")]
    pub wind_speed: Option<f64>,

    #[serde(rename = "direccion_viento")]
    pub wind_direction: Option<String>,

    #[serde(rename = "precipitacion")]
    pub precipitation: Option<f64>,

    #[serde(rename = "visibilidad")]
    pub visibility: Option<f64>,
}

impl WeatherReading {
    /// Artifact column order; must match the serde renames above.
    pub const COLUMNS: [&'static str; 9] = [
        "fecha",
        "ciudad",
        "temperatura_celsius",
        "humedad",
        "presion_atmosferica",
        "velocidad_viento",
        "direccion_viento",
        "precipitacion",
        "visibilidad",
    ];

    /// True when every field carries a value.
    pub fn is_complete(&self) -> bool {
        self.observed_at.is_some()
            && self.city.is_some()
            && self.temperature_celsius.is_some()
            && self.humidity.is_some()
            && self.pressure.is_some()
            && self.wind_speed.is_some()
            && self.wind_direction.is_some()
            && self.precipitation.is_some()
            && self.visibility.is_some()
    }

    pub fn temperature_in_accepted_range(&self) -> bool {
        self.temperature_celsius
            .is_some_and(|t| (MIN_ACCEPTED_TEMP..=MAX_ACCEPTED_TEMP).contains(&t))
    }
}

/// Temperature band derived from the Celsius value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureCategory {
    #[serde(rename = "cold")]
    Cold,
    #[serde(rename = "mild")]
    Mild,
    #[serde(rename = "hot")]
    Hot,
    #[serde(rename = "very hot")]
    VeryHot,
}

impl TemperatureCategory {
    pub fn from_celsius(celsius: f64) -> Self {
        if celsius < MILD_THRESHOLD {
            TemperatureCategory::Cold
        } else if celsius < HOT_THRESHOLD {
            TemperatureCategory::Mild
        } else if celsius < VERY_HOT_THRESHOLD {
            TemperatureCategory::Hot
        } else {
            TemperatureCategory::VeryHot
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureCategory::Cold => "cold",
            TemperatureCategory::Mild => "mild",
            TemperatureCategory::Hot => "hot",
            TemperatureCategory::VeryHot => "very hot",
        }
    }
}

impl fmt::Display for TemperatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Simplified heat index: Celsius plus a tenth of the relative humidity.
pub fn heat_index(celsius: f64, humidity: f64) -> f64 {
    celsius + humidity * 0.1
}

/// Cleaned and enriched reading (transformed artifact row).
///
/// Raw fields are required here; derived columns are appended after the raw
/// ones so the transformed artifact is a superset of the raw layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedReading {
    #[serde(rename = "fecha")]
    pub observed_at: String,

    #[serde(rename = "ciudad")]
    pub city: String,

    #[serde(rename = "temperatura_celsius")]
    pub temperature_celsius: f64,

    #[serde(rename = "humedad")]
    pub humidity: f64,

    #[serde(rename = "presion_atmosferica")]
    pub pressure: f64,

    #[serde(rename = "velocidad_viento")]
    pub wind_speed: f64,

    #[serde(rename = "direccion_viento")]
    pub wind_direction: String,

    #[serde(rename = "precipitacion")]
    pub precipitation: f64,

    #[serde(rename = "visibilidad")]
    pub visibility: f64,

    #[serde(rename = "temperatura_fahrenheit")]
    pub temperature_fahrenheit: f64,

    #[serde(rename = "processed_at")]
    pub processed_at: String,

    #[serde(rename = "indice_calor")]
    pub heat_index: f64,

    #[serde(rename = "categoria_temperatura")]
    pub category: TemperatureCategory,
}

impl EnrichedReading {
    /// Artifact column order: the raw columns followed by the derived ones.
    pub const COLUMNS: [&'static str; 13] = [
        "fecha",
        "ciudad",
        "temperatura_celsius",
        "humedad",
        "presion_atmosferica",
        "velocidad_viento",
        "direccion_viento",
        "precipitacion",
        "visibilidad",
        "temperatura_fahrenheit",
        "processed_at",
        "indice_calor",
        "categoria_temperatura",
    ];

    /// Build an enriched row from a complete raw reading. Returns `None` when
    /// any field is missing.
    pub fn from_reading(reading: WeatherReading, processed_at: &str) -> Option<Self> {
        let WeatherReading {
            observed_at,
            city,
            temperature_celsius,
            humidity,
            pressure,
            wind_speed,
            wind_direction,
            precipitation,
            visibility,
        } = reading;

        let temperature_celsius = temperature_celsius?;
        let humidity = humidity?;

        Some(Self {
            observed_at: observed_at?,
            city: city?,
            temperature_celsius,
            humidity,
            pressure: pressure?,
            wind_speed: wind_speed?,
            wind_direction: wind_direction?,
            precipitation: precipitation?,
            visibility: visibility?,
            temperature_fahrenheit: celsius_to_fahrenheit(temperature_celsius),
            processed_at: processed_at.to_string(),
            heat_index: heat_index(temperature_celsius, humidity),
            category: TemperatureCategory::from_celsius(temperature_celsius),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_reading(celsius: f64, humidity: f64) -> WeatherReading {
        WeatherReading {
            observed_at: Some("2024-06-01 12:00:00".to_string()),
            city: Some("Bogotá".to_string()),
            temperature_celsius: Some(celsius),
            humidity: Some(humidity),
            pressure: Some(1013.2),
            wind_speed: Some(6.5),
            wind_direction: Some("NE".to_string()),
            precipitation: Some(0.0),
            visibility: Some(10.0),
        }
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(TemperatureCategory::from_celsius(17.9), TemperatureCategory::Cold);
        assert_eq!(TemperatureCategory::from_celsius(18.0), TemperatureCategory::Mild);
        assert_eq!(TemperatureCategory::from_celsius(24.9), TemperatureCategory::Mild);
        assert_eq!(TemperatureCategory::from_celsius(25.0), TemperatureCategory::Hot);
        assert_eq!(TemperatureCategory::from_celsius(29.9), TemperatureCategory::Hot);
        assert_eq!(TemperatureCategory::from_celsius(30.0), TemperatureCategory::VeryHot);
    }

    #[test]
    fn test_fahrenheit_conversion() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(celsius_to_fahrenheit(21.5), 21.5 * 9.0 / 5.0 + 32.0);
    }

    #[test]
    fn test_heat_index() {
        assert_eq!(heat_index(25.0, 80.0), 33.0);
        assert_eq!(heat_index(18.0, 0.0), 18.0);
    }

    #[test]
    fn test_enrichment_requires_complete_reading() {
        let mut reading = complete_reading(22.0, 70.0);
        reading.pressure = None;

        assert!(!reading.is_complete());
        assert!(EnrichedReading::from_reading(reading, "2024-06-01 12:05:00").is_none());
    }

    #[test]
    fn test_enrichment_derives_columns() {
        let reading = complete_reading(26.0, 75.0);
        let enriched = EnrichedReading::from_reading(reading, "2024-06-01 12:05:00")
            .expect("complete reading should enrich");

        assert_eq!(enriched.temperature_fahrenheit, 26.0 * 9.0 / 5.0 + 32.0);
        assert_eq!(enriched.heat_index, 26.0 + 7.5);
        assert_eq!(enriched.category, TemperatureCategory::Hot);
        assert_eq!(enriched.processed_at, "2024-06-01 12:05:00");
    }

    #[test]
    fn test_accepted_temperature_range_is_inclusive() {
        assert!(complete_reading(-10.0, 70.0).temperature_in_accepted_range());
        assert!(complete_reading(50.0, 70.0).temperature_in_accepted_range());
        assert!(!complete_reading(-10.1, 70.0).temperature_in_accepted_range());
        assert!(!complete_reading(50.1, 70.0).temperature_in_accepted_range());
    }

    #[test]
    fn test_plausibility_ranges() {
        use validator::Validate;

        // 55°C is implausible for the transform filter but plausible physically
        assert!(complete_reading(55.0, 70.0).validate().is_ok());
        assert!(complete_reading(70.0, 70.0).validate().is_err());
        assert!(complete_reading(22.0, 140.0).validate().is_err());

        let mut sparse = complete_reading(22.0, 70.0);
        sparse.temperature_celsius = None;
        sparse.humidity = None;
        assert!(sparse.validate().is_ok());
    }
}
