use chrono::{Duration, Local};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::WeatherReading;
use crate::utils::constants::{
    OBSERVATION_TIMESTAMP_FORMAT, SYNTHETIC_TICKS, SYNTHETIC_TICK_MINUTES,
};

/// City temperature profiles for generated data: name, min °C, max °C.
pub const CITY_PROFILES: [(&str, f64, f64); 3] = [
    ("Bogotá", 15.0, 25.0),
    ("Medellín", 20.0, 30.0),
    ("Cali", 25.0, 35.0),
];

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Stand-in data source for when the spreadsheet is unreachable. Produces
/// one reading per city per tick, ticks stepping backward from now.
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self) -> Vec<WeatherReading> {
        let mut rng = rand::thread_rng();
        let base_time = Local::now();
        let mut readings = Vec::with_capacity(SYNTHETIC_TICKS * CITY_PROFILES.len());

        for tick in 0..SYNTHETIC_TICKS {
            let observed = base_time - Duration::minutes(tick as i64 * SYNTHETIC_TICK_MINUTES);
            let observed_at = observed.format(OBSERVATION_TIMESTAMP_FORMAT).to_string();

            for (city, temp_min, temp_max) in CITY_PROFILES {
                readings.push(WeatherReading {
                    observed_at: Some(observed_at.clone()),
                    city: Some(city.to_string()),
                    temperature_celsius: Some(round1(rng.gen_range(temp_min..=temp_max))),
                    humidity: Some(f64::from(rng.gen_range(60..=90))),
                    pressure: Some(round1(rng.gen_range(1010.0..=1020.0))),
                    wind_speed: Some(round1(rng.gen_range(2.0..=15.0))),
                    wind_direction: COMPASS_POINTS.choose(&mut rng).map(|d| d.to_string()),
                    precipitation: Some(round1(rng.gen_range(0.0..=5.0))),
                    visibility: Some(round1(rng.gen_range(8.0..=15.0))),
                });
            }
        }

        readings
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
