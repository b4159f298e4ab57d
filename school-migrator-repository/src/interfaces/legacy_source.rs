//! This module defines the `LegacySource` trait, the read-only view of the
//! legacy database the migrators pull rows from.
use school_migrator_shared::LegacyRow;

use crate::errors::LegacySourceError;

/// Read access to the legacy database.
///
/// Tables are optional: callers probe with `table_exists` before fetching.
#[async_trait::async_trait]
pub trait LegacySource: Send + Sync {
    /// Checks whether a table exists in the legacy schema.
    ///
    /// # Arguments
    ///
    /// * `table` - Unqualified table name
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The table exists
    /// * `Ok(false)` - The table is absent from this export
    /// * `Err(LegacySourceError)` - The probe itself failed
    async fn table_exists(&self, table: &str) -> Result<bool, LegacySourceError>;

    /// Reads every row of a table into memory.
    ///
    /// # Arguments
    ///
    /// * `table` - Unqualified table name
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LegacyRow>)` - All rows, NULL columns omitted
    /// * `Err(LegacySourceError)` - Query failure or invalid table name
    async fn fetch_rows(&self, table: &str) -> Result<Vec<LegacyRow>, LegacySourceError>;

    /// Releases the underlying connection handle.
    async fn close(&self);
}
