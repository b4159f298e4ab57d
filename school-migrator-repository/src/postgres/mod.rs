//! PostgreSQL implementation of the target repository.
mod target_repository;

pub use target_repository::PostgresTargetRepository;
