//! Collections migrator: `colecoes` → `collections`, keyed by name.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_migrator_repository::{TargetRepository, TargetRepositoryError};
use school_migrator_shared::{EntityKind, LegacyRow, NewCollection};
use uuid::Uuid;

use super::{EntityMigrator, NOT_INFORMED, fields, key_or_synthesized, text_or, timestamps};
use crate::bootstrap::FallbackEntities;
use crate::errors::RowError;

const SYNTHESIZED_NAME_PREFIX: &str = "COLLECTION_";
const DEFAULT_COLLECTION_TYPE: &str = "general";

pub struct CollectionsMigrator {
    fallback: FallbackEntities,
}

impl CollectionsMigrator {
    pub fn new(fallback: FallbackEntities) -> Self {
        Self { fallback }
    }

    /// Builds the target row from a legacy row.
    pub fn transform(&self, row: &LegacyRow, name: String, now: DateTime<Utc>) -> NewCollection {
        let (created_at, updated_at) = timestamps(row, now);
        let items_count = row
            .integer(&fields::ITEMS_COUNT)
            .and_then(|count| i32::try_from(count.max(0)).ok())
            .unwrap_or(0);

        NewCollection {
            id: Uuid::new_v4(),
            name,
            description: text_or(row, &fields::DESCRIPTION, NOT_INFORMED),
            collection_type: text_or(row, &fields::TYPE, DEFAULT_COLLECTION_TYPE),
            // Legacy owners are not mapped to target users.
            created_by: None,
            institution_id: self.fallback.institution_id,
            is_public: row.flag(&fields::IS_PUBLIC).unwrap_or(false),
            items_count,
            tags: row.list(&fields::TAGS),
            created_at,
            updated_at,
        }
    }
}

#[async_trait]
impl EntityMigrator for CollectionsMigrator {
    fn kind(&self) -> EntityKind {
        EntityKind::Collections
    }

    fn natural_key(&self, row: &LegacyRow) -> Result<String, RowError> {
        key_or_synthesized(row, &fields::NAME, SYNTHESIZED_NAME_PREFIX)
    }

    async fn exists(
        &self,
        target: &dyn TargetRepository,
        key: &str,
    ) -> Result<bool, TargetRepositoryError> {
        target.collection_exists(key).await
    }

    async fn insert(
        &self,
        target: &dyn TargetRepository,
        row: &LegacyRow,
        key: String,
    ) -> Result<(), RowError> {
        let collection = self.transform(row, key, Utc::now());
        target.insert_collection(&collection).await?;
        Ok(())
    }
}
