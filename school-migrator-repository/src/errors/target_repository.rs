//! Error types for the target repository.
use thiserror::Error;

/// Represents errors that can occur while reading from or writing to the
/// target database.
///
/// Constraint violations on insert surface as `DatabaseError` and are
/// treated as row-level failures by the migrators.
#[derive(Debug, Error)]
pub enum TargetRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
