//! Error types for the migrator repositories.
//! Consolidates and re-exports the errors of the legacy source and the target repository.
mod legacy_source;
mod target_repository;

pub use legacy_source::LegacySourceError;
pub use target_repository::TargetRepositoryError;
