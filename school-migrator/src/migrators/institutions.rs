//! Institutions migrator: `instituicoes` → `institutions`, keyed by code.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_migrator_repository::{TargetRepository, TargetRepositoryError};
use school_migrator_shared::{EntityKind, LegacyRow, NewInstitution};
use uuid::Uuid;

use super::{
    EntityMigrator, NOT_INFORMED, address, fields, key_or_synthesized, status, text_or, timestamps,
};
use crate::errors::RowError;

const SYNTHESIZED_CODE_PREFIX: &str = "INST_";

#[derive(Debug, Default)]
pub struct InstitutionsMigrator;

impl InstitutionsMigrator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the target row from a legacy row.
    pub fn transform(&self, row: &LegacyRow, code: String, now: DateTime<Utc>) -> NewInstitution {
        let (created_at, updated_at) = timestamps(row, now);
        NewInstitution {
            id: Uuid::new_v4(),
            name: text_or(row, &fields::NAME, NOT_INFORMED),
            code,
            description: text_or(row, &fields::DESCRIPTION, NOT_INFORMED),
            address: address(row),
            phone: text_or(row, &fields::PHONE, NOT_INFORMED),
            email: text_or(row, &fields::EMAIL, NOT_INFORMED),
            status: status(row),
            created_at,
            updated_at,
        }
    }
}

#[async_trait]
impl EntityMigrator for InstitutionsMigrator {
    fn kind(&self) -> EntityKind {
        EntityKind::Institutions
    }

    fn natural_key(&self, row: &LegacyRow) -> Result<String, RowError> {
        key_or_synthesized(row, &fields::CODE, SYNTHESIZED_CODE_PREFIX)
    }

    async fn exists(
        &self,
        target: &dyn TargetRepository,
        key: &str,
    ) -> Result<bool, TargetRepositoryError> {
        Ok(target.find_institution_id(key).await?.is_some())
    }

    async fn insert(
        &self,
        target: &dyn TargetRepository,
        row: &LegacyRow,
        key: String,
    ) -> Result<(), RowError> {
        let institution = self.transform(row, key, Utc::now());
        target.insert_institution(&institution).await?;
        Ok(())
    }
}
