//! Error types for the legacy source.
use thiserror::Error;

/// Represents errors that can occur while reading the legacy database.
#[derive(Debug, Error)]
pub enum LegacySourceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Table names are interpolated into SQL, so only plain identifiers are accepted.
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}
