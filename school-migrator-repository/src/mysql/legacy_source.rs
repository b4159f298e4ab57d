//! MySQL-backed legacy source.
//!
//! Reads whole tables of the legacy schema and hands them out as loosely
//! typed `LegacyRow`s. The schema itself is never modified.
use async_trait::async_trait;
use school_migrator_shared::LegacyRow;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use tracing::debug;

use super::row::decode_row;
use crate::{LegacySource, LegacySourceError};

/// Legacy source reading from a MySQL connection pool.
pub struct MySqlLegacySource {
    pool: MySqlPool,
}

impl MySqlLegacySource {
    /// Wraps an existing pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against the legacy database.
    ///
    /// # Arguments
    ///
    /// * `options` - Host, port, credentials and schema of the legacy database
    /// * `max_connections` - Pool size
    ///
    /// # Returns
    ///
    /// * `Ok(MySqlLegacySource)` - Connected source
    /// * `Err(LegacySourceError)` - The database is unreachable or rejected the credentials
    pub async fn connect(
        options: MySqlConnectOptions,
        max_connections: u32,
    ) -> Result<Self, LegacySourceError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }
}

/// Rejects anything that is not a plain identifier.
fn validate_table_name(table: &str) -> Result<(), LegacySourceError> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(LegacySourceError::InvalidTableName(table.to_string()))
    }
}

#[async_trait]
impl LegacySource for MySqlLegacySource {
    async fn table_exists(&self, table: &str) -> Result<bool, LegacySourceError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM information_schema.tables
            WHERE table_schema = DATABASE() AND table_name = ?
            "#,
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn fetch_rows(&self, table: &str) -> Result<Vec<LegacyRow>, LegacySourceError> {
        validate_table_name(table)?;

        let rows = sqlx::query(&format!("SELECT * FROM `{}`", table))
            .fetch_all(&self.pool)
            .await?;

        debug!(table, rows = rows.len(), "Fetched legacy rows");

        Ok(rows.iter().map(decode_row).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
