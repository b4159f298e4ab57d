// Migration executor - runs bootstrap, then every entity migrator in dependency order
use std::sync::Arc;
use std::time::Instant;

use school_migrator_repository::{LegacySource, TargetRepository};
use school_migrator_shared::MigrationStats;
use tracing::{error, info};

use crate::bootstrap::{DefaultEntityBootstrapper, FallbackEntities};
use crate::config::DefaultEntitiesConfig;
use crate::errors::MigrationError;
use crate::migrators::{
    CollectionsMigrator, EntityMigrator, FilesMigrator, InstitutionsMigrator, SchoolsMigrator,
    UsersMigrator, migrate_entity,
};
use crate::password::PasswordHasher;
use crate::report::SummaryReport;

/// Migration executor that coordinates one run over both databases
pub struct MigrationExecutor {
    source: Arc<dyn LegacySource>,
    target: Arc<dyn TargetRepository>,
    hasher: Arc<dyn PasswordHasher>,
    defaults: DefaultEntitiesConfig,
}

impl MigrationExecutor {
    pub fn new(
        source: Arc<dyn LegacySource>,
        target: Arc<dyn TargetRepository>,
        hasher: Arc<dyn PasswordHasher>,
        defaults: DefaultEntitiesConfig,
    ) -> Self {
        Self {
            source,
            target,
            hasher,
            defaults,
        }
    }

    /// Execute the full migration.
    ///
    /// Only a bootstrap failure aborts the run; entity and row failures end
    /// up in the report counters.
    pub async fn execute(&self) -> Result<SummaryReport, MigrationError> {
        let start_time = Instant::now();

        info!("\n=== Ensuring default entities ===");
        let fallback = DefaultEntityBootstrapper::new(self.target.as_ref(), &self.defaults)
            .bootstrap()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to bootstrap default entities, aborting");
                MigrationError::Bootstrap(e)
            })?;

        let mut stats = MigrationStats::new();
        for migrator in self.migrators(fallback) {
            let entity_stats =
                migrate_entity(self.source.as_ref(), self.target.as_ref(), migrator.as_ref()).await;
            stats.record(migrator.kind(), entity_stats);
        }

        Ok(SummaryReport::new(stats, start_time.elapsed(), &self.defaults))
    }

    /// Migrators in foreign-key order: users reference institutions and schools.
    fn migrators(&self, fallback: FallbackEntities) -> Vec<Box<dyn EntityMigrator>> {
        vec![
            Box::new(InstitutionsMigrator::new()),
            Box::new(SchoolsMigrator::new(fallback)),
            Box::new(UsersMigrator::new(
                fallback,
                Arc::clone(&self.hasher),
                self.defaults.default_password.clone(),
            )),
            Box::new(FilesMigrator::new()),
            Box::new(CollectionsMigrator::new(fallback)),
        ]
    }
}
