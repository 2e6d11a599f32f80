pub mod constants;
pub mod filename;

pub use constants::*;
pub use filename::generate_snapshot_filename;
