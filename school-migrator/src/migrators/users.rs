//! Users migrator: `usuarios` → `users`, keyed by email.
//!
//! Users are attached to the fallback role, institution and school. Legacy
//! passwords survive only when they are already hashes.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_migrator_repository::{TargetRepository, TargetRepositoryError};
use school_migrator_shared::{EntityKind, LegacyRow, NewUser};
use tracing::debug;
use uuid::Uuid;

use super::{EntityMigrator, NOT_INFORMED, address, fields, is_active, text_or, timestamps};
use crate::bootstrap::FallbackEntities;
use crate::errors::RowError;
use crate::password::PasswordHasher;

pub struct UsersMigrator {
    fallback: FallbackEntities,
    hasher: Arc<dyn PasswordHasher>,
    default_password: String,
}

impl UsersMigrator {
    pub fn new(
        fallback: FallbackEntities,
        hasher: Arc<dyn PasswordHasher>,
        default_password: impl Into<String>,
    ) -> Self {
        Self {
            fallback,
            hasher,
            default_password: default_password.into(),
        }
    }

    /// Keeps a legacy hash, otherwise hashes the default password.
    fn password(&self, row: &LegacyRow) -> Result<String, RowError> {
        match row.text(&fields::PASSWORD) {
            Some(legacy) if self.hasher.is_hashed(&legacy) => Ok(legacy),
            _ => {
                debug!(
                    legacy_id = row.legacy_id().as_deref().unwrap_or("unknown"),
                    "Legacy password is not a hash, using default password"
                );
                Ok(self.hasher.hash(&self.default_password)?)
            }
        }
    }

    /// Builds the target row from a legacy row.
    pub fn transform(
        &self,
        row: &LegacyRow,
        email: String,
        now: DateTime<Utc>,
    ) -> Result<NewUser, RowError> {
        let (created_at, updated_at) = timestamps(row, now);
        Ok(NewUser {
            id: Uuid::new_v4(),
            email,
            password: self.password(row)?,
            name: text_or(row, &fields::NAME, NOT_INFORMED),
            cpf: row.text(&fields::CPF),
            phone: row.text(&fields::PHONE),
            birth_date: row.date(&fields::BIRTH_DATE),
            address: address(row),
            is_active: is_active(row),
            role_id: self.fallback.role_id,
            institution_id: self.fallback.institution_id,
            school_id: self.fallback.school_id,
            created_at,
            updated_at,
        })
    }
}

#[async_trait]
impl EntityMigrator for UsersMigrator {
    fn kind(&self) -> EntityKind {
        EntityKind::Users
    }

    fn natural_key(&self, row: &LegacyRow) -> Result<String, RowError> {
        row.text(&fields::EMAIL)
            .ok_or(RowError::MissingField(fields::EMAIL.primary()))
    }

    async fn exists(
        &self,
        target: &dyn TargetRepository,
        key: &str,
    ) -> Result<bool, TargetRepositoryError> {
        target.user_exists(key).await
    }

    async fn insert(
        &self,
        target: &dyn TargetRepository,
        row: &LegacyRow,
        key: String,
    ) -> Result<(), RowError> {
        let user = self.transform(row, key, Utc::now())?;
        target.insert_user(&user).await?;
        Ok(())
    }
}
