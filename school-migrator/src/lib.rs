//! # School Migrator
//!
//! Batch engine that copies the legacy MySQL school platform database
//! (Portuguese table and column names) into the normalized PostgreSQL schema.
//!
//! ## Pipeline
//!
//! 1. **Connection manager**: opens both databases, closes both at the end
//! 2. **Bootstrapper**: ensures the fallback role, institution and school exist
//! 3. **Entity migrators**: institutions, schools, users, files, collections, in that order
//! 4. **Summary report**: per-entity migrated / skipped / errored counts
//!
//! Every run is idempotent: rows already present under their natural key are
//! skipped, never updated.
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration
//! - [`connection`]: Scoped ownership of both database handles
//! - [`bootstrap`]: Default entity bootstrapper
//! - [`migrators`]: The per-entity migrators and their shared row loop
//! - [`migration`]: The executor running the pipeline
//! - [`password`]: Password hash detection and generation
//! - [`report`]: Summary rendering
//! - [`errors`]: Error types

pub mod bootstrap;
pub mod config;
pub mod connection;
pub mod errors;
pub mod migration;
pub mod migrators;
pub mod password;
pub mod report;

pub use config::MigrationConfig;
pub use connection::ConnectionManager;
pub use errors::{MigrationError, RowError};
pub use migration::MigrationExecutor;
pub use report::SummaryReport;
