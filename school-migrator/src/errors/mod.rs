//! Error types for the School Migrator.
//!
//! Two classes matter to the pipeline: `MigrationError` ends the run and is
//! returned from `main`, while `RowError` is scoped to a single legacy row
//! and is only ever counted and logged by the row loop.
use school_migrator_repository::{LegacySourceError, TargetRepositoryError};
use thiserror::Error;

/// Run-aborting errors.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to connect to the legacy database: {0}")]
    LegacyConnection(#[source] LegacySourceError),

    #[error("Failed to connect to the target database: {0}")]
    TargetConnection(#[source] TargetRepositoryError),

    /// The fallback role, institution or school could not be ensured.
    #[error("Failed to bootstrap default entities: {0}")]
    Bootstrap(#[source] TargetRepositoryError),
}

impl MigrationError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Failure to produce a password hash.
#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

/// Row-recoverable errors: counted against one entity, never propagated.
#[derive(Debug, Error)]
pub enum RowError {
    /// A required field is absent and has no usable default.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Target error: {0}")]
    Target(#[from] TargetRepositoryError),

    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
}
