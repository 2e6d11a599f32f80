/// Artifact file names
pub const RAW_DATA_FILE: &str = "raw_weather_data.csv";
pub const TRANSFORMED_DATA_FILE: &str = "transformed_weather_data.csv";
pub const SNAPSHOT_FILE_PREFIX: &str = "weather_data_";
pub const LATEST_DATA_FILE: &str = "weather_data_latest.csv";

/// Default locations
pub const DEFAULT_PROCESSED_DIR: &str = "data/processed";
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials/google_sheets_credentials.json";

/// Environment variables
pub const SHEET_ID_ENV: &str = "GOOGLE_SHEET_ID";

/// Transform-stage temperature acceptance range (°C)
pub const MIN_ACCEPTED_TEMP: f64 = -10.0;
pub const MAX_ACCEPTED_TEMP: f64 = 50.0;

/// Temperature category thresholds (°C)
pub const MILD_THRESHOLD: f64 = 18.0;
pub const HOT_THRESHOLD: f64 = 25.0;
pub const VERY_HOT_THRESHOLD: f64 = 30.0;

/// Quality score deductions
pub const NULL_VALUES_PENALTY: i32 = 20;
pub const DUPLICATE_ROWS_PENALTY: i32 = 15;
pub const TEMP_OUT_OF_RANGE_PENALTY: i32 = 25;
pub const HUMIDITY_OUT_OF_RANGE_PENALTY: i32 = 20;

/// Timestamp formats
pub const OBSERVATION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Synthetic generation shape: ticks going backward from now, minutes apart
pub const SYNTHETIC_TICKS: usize = 10;
pub const SYNTHETIC_TICK_MINUTES: i64 = 5;
