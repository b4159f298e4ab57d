//! # School Migrator Shared
//!
//! Data types shared between the migration engine and its repositories:
//! loosely typed legacy rows, the field-alias accessors used to reconcile
//! Portuguese and English column names, the target insert records and the
//! per-entity migration counters.
pub mod types;

pub use types::*;
