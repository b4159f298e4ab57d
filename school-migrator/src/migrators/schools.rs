//! Schools migrator: `escolas` → `schools`, keyed by code.
//!
//! Every school is linked to the fallback institution; legacy institution
//! references are not resolved.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_migrator_repository::{TargetRepository, TargetRepositoryError};
use school_migrator_shared::{EntityKind, LegacyRow, NewSchool};
use uuid::Uuid;

use super::{
    EntityMigrator, NOT_INFORMED, address, fields, key_or_synthesized, status, text_or, timestamps,
};
use crate::bootstrap::FallbackEntities;
use crate::errors::RowError;

const SYNTHESIZED_CODE_PREFIX: &str = "SCHOOL_";

pub struct SchoolsMigrator {
    fallback: FallbackEntities,
}

impl SchoolsMigrator {
    pub fn new(fallback: FallbackEntities) -> Self {
        Self { fallback }
    }

    /// Builds the target row from a legacy row.
    pub fn transform(&self, row: &LegacyRow, code: String, now: DateTime<Utc>) -> NewSchool {
        let (created_at, updated_at) = timestamps(row, now);
        NewSchool {
            id: Uuid::new_v4(),
            name: text_or(row, &fields::NAME, NOT_INFORMED),
            code,
            description: text_or(row, &fields::DESCRIPTION, NOT_INFORMED),
            address: address(row),
            institution_id: self.fallback.institution_id,
            status: status(row),
            created_at,
            updated_at,
        }
    }
}

#[async_trait]
impl EntityMigrator for SchoolsMigrator {
    fn kind(&self) -> EntityKind {
        EntityKind::Schools
    }

    fn natural_key(&self, row: &LegacyRow) -> Result<String, RowError> {
        key_or_synthesized(row, &fields::CODE, SYNTHESIZED_CODE_PREFIX)
    }

    async fn exists(
        &self,
        target: &dyn TargetRepository,
        key: &str,
    ) -> Result<bool, TargetRepositoryError> {
        Ok(target.find_school_id(key).await?.is_some())
    }

    async fn insert(
        &self,
        target: &dyn TargetRepository,
        row: &LegacyRow,
        key: String,
    ) -> Result<(), RowError> {
        let school = self.transform(row, key, Utc::now());
        target.insert_school(&school).await?;
        Ok(())
    }
}
