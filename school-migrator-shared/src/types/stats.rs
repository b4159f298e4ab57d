//! Per-entity migration counters.
//!
//! Migrators never share a counter object: each returns its own
//! `EntityStats` and the executor folds them into one `MigrationStats`.
use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::EntityKind;

/// Outcome counts of one entity migrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStats {
    /// Rows inserted into the target.
    pub migrated: u64,
    /// Rows already present under the same natural key.
    pub skipped: u64,
    /// Rows that failed to transform or insert.
    pub errors: u64,
}

impl EntityStats {
    pub fn new(migrated: u64, skipped: u64, errors: u64) -> Self {
        Self {
            migrated,
            skipped,
            errors,
        }
    }

    /// Number of rows the migrator looked at.
    pub fn processed(&self) -> u64 {
        self.migrated + self.skipped + self.errors
    }

    pub fn with_migrated(self) -> Self {
        Self {
            migrated: self.migrated + 1,
            ..self
        }
    }

    pub fn with_skipped(self) -> Self {
        Self {
            skipped: self.skipped + 1,
            ..self
        }
    }

    pub fn with_error(self) -> Self {
        Self {
            errors: self.errors + 1,
            ..self
        }
    }
}

impl Add for EntityStats {
    type Output = EntityStats;

    fn add(self, other: EntityStats) -> EntityStats {
        EntityStats {
            migrated: self.migrated + other.migrated,
            skipped: self.skipped + other.skipped,
            errors: self.errors + other.errors,
        }
    }
}

/// Counters for a whole run, one triple per entity kind.
///
/// Lives only for the duration of a run and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStats {
    pub institutions: EntityStats,
    pub schools: EntityStats,
    pub users: EntityStats,
    pub files: EntityStats,
    pub collections: EntityStats,
}

impl MigrationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the result of one migrator into the run totals.
    pub fn record(&mut self, kind: EntityKind, stats: EntityStats) {
        let slot = match kind {
            EntityKind::Institutions => &mut self.institutions,
            EntityKind::Schools => &mut self.schools,
            EntityKind::Users => &mut self.users,
            EntityKind::Files => &mut self.files,
            EntityKind::Collections => &mut self.collections,
        };
        *slot = *slot + stats;
    }

    pub fn get(&self, kind: EntityKind) -> EntityStats {
        match kind {
            EntityKind::Institutions => self.institutions,
            EntityKind::Schools => self.schools,
            EntityKind::Users => self.users,
            EntityKind::Files => self.files,
            EntityKind::Collections => self.collections,
        }
    }

    /// Counters in migration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, EntityStats)> + '_ {
        EntityKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Sum of every entity's counters.
    pub fn totals(&self) -> EntityStats {
        self.iter()
            .fold(EntityStats::default(), |acc, (_, stats)| acc + stats)
    }
}
