//! This module defines and re-exports the interfaces of the migrator repositories.
mod legacy_source;
mod target_repository;

pub use legacy_source::LegacySource;
pub use target_repository::TargetRepository;
