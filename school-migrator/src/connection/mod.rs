//! Connection manager.
//!
//! Owns the legacy and target handles for the duration of a run and closes
//! both exactly once when the run ends, whatever its outcome.
use std::future::Future;
use std::sync::Arc;

use school_migrator_repository::{
    LegacySource, MySqlLegacySource, PostgresTargetRepository, TargetRepository,
};
use tracing::{error, info};

use crate::config::MigrationConfig;
use crate::errors::MigrationError;

pub struct ConnectionManager {
    source: Arc<dyn LegacySource>,
    target: Arc<dyn TargetRepository>,
}

impl ConnectionManager {
    /// Opens the legacy database, then the target database.
    ///
    /// If the target cannot be reached the already opened legacy pool is
    /// closed before returning.
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionManager)` - Both databases reachable
    /// * `Err(MigrationError::LegacyConnection)` - The legacy database is unreachable
    /// * `Err(MigrationError::TargetConnection)` - The target database is unreachable
    pub async fn connect(config: &MigrationConfig) -> Result<Self, MigrationError> {
        info!(
            host = %config.legacy.host,
            database = %config.legacy.database,
            "Connecting to legacy MySQL..."
        );
        let source = MySqlLegacySource::connect(
            config.legacy.connect_options(),
            config.legacy.max_connections,
        )
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to connect to legacy MySQL");
            MigrationError::LegacyConnection(e)
        })?;
        info!("✓ Connected to legacy MySQL");

        info!("Connecting to target PostgreSQL...");
        let target = match PostgresTargetRepository::connect(
            &config.target.database_url,
            config.target.max_connections,
        )
        .await
        {
            Ok(target) => target,
            Err(e) => {
                error!(error = %e, "Failed to connect to target PostgreSQL");
                source.close().await;
                return Err(MigrationError::TargetConnection(e));
            }
        };
        info!("✓ Connected to target PostgreSQL");

        Ok(Self::from_parts(Arc::new(source), Arc::new(target)))
    }

    /// Wraps already opened handles.
    pub fn from_parts(source: Arc<dyn LegacySource>, target: Arc<dyn TargetRepository>) -> Self {
        Self { source, target }
    }

    /// Runs `f` with both handles, then closes them.
    ///
    /// The manager is consumed, so the handles cannot be closed twice.
    pub async fn run<F, Fut, T>(self, f: F) -> T
    where
        F: FnOnce(Arc<dyn LegacySource>, Arc<dyn TargetRepository>) -> Fut,
        Fut: Future<Output = T>,
    {
        let output = f(Arc::clone(&self.source), Arc::clone(&self.target)).await;
        self.close().await;
        output
    }

    async fn close(self) {
        self.source.close().await;
        self.target.close().await;
        info!("✓ Database connections closed");
    }
}
