//! # School Migrator Repository
//! This crate provides the traits and implementations used by the migration
//! engine to talk to its two databases: the legacy MySQL schema it reads
//! from and the PostgreSQL schema it writes to.
pub mod errors;
pub mod interfaces;
pub mod mysql;
pub mod postgres;

pub use errors::{LegacySourceError, TargetRepositoryError};
pub use interfaces::{LegacySource, TargetRepository};
pub use mysql::MySqlLegacySource;
pub use postgres::PostgresTargetRepository;
