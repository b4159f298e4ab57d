//! Pipeline orchestration.
pub mod executor;

pub use executor::MigrationExecutor;
