pub mod quality_checker;

pub use quality_checker::QualityChecker;
