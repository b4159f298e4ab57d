//! School Migrator Main Entry Point
//!
//! Copies the legacy MySQL school platform database into the normalized
//! PostgreSQL schema, then prints a per-entity summary.

use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use school_migrator::password::Argon2PasswordHasher;
use school_migrator::{ConnectionManager, MigrationConfig, MigrationError, MigrationExecutor};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), MigrationError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("school_migrator=info,school_migrator_repository=info"));

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        // Structured logging for log shippers
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
            .map_err(|e| MigrationError::config(format!("Failed to initialize tracing: {e}")))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()
            .map_err(|e| MigrationError::config(format!("Failed to initialize tracing: {e}")))?;
    }

    info!(
        service_name = "school-migrator",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), MigrationError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    info!("Starting legacy MySQL to PostgreSQL migration");

    let config = MigrationConfig::from_env().inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;

    let connections = ConnectionManager::connect(&config).await?;

    let defaults = config.defaults.clone();
    let result = connections
        .run(|source, target| async move {
            let hasher = Arc::new(Argon2PasswordHasher::new());
            MigrationExecutor::new(source, target, hasher, defaults)
                .execute()
                .await
        })
        .await;

    match result {
        Ok(report) => {
            report.log();
            info!("Migration completed");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Migration failed");
            Err(e)
        }
    }
}
