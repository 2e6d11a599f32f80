use chrono::Local;

use crate::utils::constants::{SNAPSHOT_FILE_PREFIX, SNAPSHOT_TIMESTAMP_FORMAT};

/// Generate a snapshot filename with format: weather_data_{YYYYMMDD_HHMMSS}.csv
pub fn generate_snapshot_filename() -> String {
    let timestamp = Local::now().format(SNAPSHOT_TIMESTAMP_FORMAT);
    format!("{}{}.csv", SNAPSHOT_FILE_PREFIX, timestamp)
}
