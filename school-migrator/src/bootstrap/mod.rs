//! Default entity bootstrapper.
//!
//! Every migrated user is attached to a fallback role, institution and
//! school, and every migrated school and collection to the fallback
//! institution. This module makes sure those rows exist (creating them at
//! most once) and grants the fallback role its baseline permissions.
use chrono::Utc;
use school_migrator_repository::{TargetRepository, TargetRepositoryError};
use school_migrator_shared::{Address, NewInstitution, NewRole, NewSchool, STATUS_ACTIVE};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{BASELINE_PERMISSIONS, DefaultEntitiesConfig};
use crate::migrators::NOT_INFORMED;

const ROLE_TYPE_SYSTEM: &str = "system";
const ROLE_DESCRIPTION: &str = "Role assigned to users migrated from the legacy database";
const INSTITUTION_NAME: &str = "Instituição Migrada (MySQL)";
const INSTITUTION_DESCRIPTION: &str = "Instituição padrão para dados migrados do sistema legado";
const INSTITUTION_EMAIL: &str = "migracao@example.com";
const SCHOOL_NAME: &str = "Escola Migrada (MySQL)";
const SCHOOL_DESCRIPTION: &str = "Escola padrão para dados migrados do sistema legado";

/// Ids of the fallback rows, reused by every migrator of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackEntities {
    pub role_id: Uuid,
    pub institution_id: Uuid,
    pub school_id: Uuid,
}

/// Idempotently creates the fallback entities in the target database.
pub struct DefaultEntityBootstrapper<'a> {
    target: &'a dyn TargetRepository,
    config: &'a DefaultEntitiesConfig,
}

impl<'a> DefaultEntityBootstrapper<'a> {
    pub fn new(target: &'a dyn TargetRepository, config: &'a DefaultEntitiesConfig) -> Self {
        Self { target, config }
    }

    /// Ensures the fallback role, institution and school exist, then grants
    /// baseline permissions if the role has none.
    ///
    /// # Returns
    ///
    /// * `Ok(FallbackEntities)` - Ids of the three fallback rows
    /// * `Err(TargetRepositoryError)` - Any lookup or insert failed; the run cannot continue
    pub async fn bootstrap(&self) -> Result<FallbackEntities, TargetRepositoryError> {
        let role_id = self.ensure_role().await?;
        let institution_id = self.ensure_institution().await?;
        let school_id = self.ensure_school(institution_id).await?;
        self.ensure_permissions(role_id).await?;

        Ok(FallbackEntities {
            role_id,
            institution_id,
            school_id,
        })
    }

    async fn ensure_role(&self) -> Result<Uuid, TargetRepositoryError> {
        let name = &self.config.role_name;
        if let Some(id) = self.target.find_role_id(name).await? {
            info!(role = %name, "✓ Fallback role already exists");
            return Ok(id);
        }

        let role = NewRole {
            id: Uuid::new_v4(),
            name: name.clone(),
            description: ROLE_DESCRIPTION.to_string(),
            role_type: ROLE_TYPE_SYSTEM.to_string(),
            status: STATUS_ACTIVE.to_string(),
            user_count: 0,
        };
        self.target.insert_role(&role).await?;
        info!(role = %name, "✓ Created fallback role");
        Ok(role.id)
    }

    async fn ensure_institution(&self) -> Result<Uuid, TargetRepositoryError> {
        let code = &self.config.institution_code;
        if let Some(id) = self.target.find_institution_id(code).await? {
            info!(code = %code, "✓ Fallback institution already exists");
            return Ok(id);
        }

        let now = Utc::now();
        let institution = NewInstitution {
            id: Uuid::new_v4(),
            name: INSTITUTION_NAME.to_string(),
            code: code.clone(),
            description: INSTITUTION_DESCRIPTION.to_string(),
            address: placeholder_address(),
            phone: NOT_INFORMED.to_string(),
            email: INSTITUTION_EMAIL.to_string(),
            status: STATUS_ACTIVE.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.target.insert_institution(&institution).await?;
        info!(code = %code, "✓ Created fallback institution");
        Ok(institution.id)
    }

    async fn ensure_school(&self, institution_id: Uuid) -> Result<Uuid, TargetRepositoryError> {
        let code = &self.config.school_code;
        if let Some(id) = self.target.find_school_id(code).await? {
            info!(code = %code, "✓ Fallback school already exists");
            return Ok(id);
        }

        let now = Utc::now();
        let school = NewSchool {
            id: Uuid::new_v4(),
            name: SCHOOL_NAME.to_string(),
            code: code.clone(),
            description: SCHOOL_DESCRIPTION.to_string(),
            address: placeholder_address(),
            institution_id,
            status: STATUS_ACTIVE.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.target.insert_school(&school).await?;
        info!(code = %code, "✓ Created fallback school");
        Ok(school.id)
    }

    /// Grants are only created when the role has none at all, so a role
    /// whose permissions were curated by hand is left untouched.
    async fn ensure_permissions(&self, role_id: Uuid) -> Result<(), TargetRepositoryError> {
        if self.target.count_role_permissions(role_id).await? > 0 {
            info!("✓ Fallback role already has permissions");
            return Ok(());
        }

        let permission_ids = self.target.find_permission_ids(BASELINE_PERMISSIONS).await?;
        if permission_ids.len() < BASELINE_PERMISSIONS.len() {
            warn!(
                expected = BASELINE_PERMISSIONS.len(),
                found = permission_ids.len(),
                "Some baseline permissions are missing from the target catalog"
            );
        }
        if permission_ids.is_empty() {
            return Ok(());
        }

        self.target
            .insert_role_permissions(role_id, &permission_ids)
            .await?;
        info!(granted = permission_ids.len(), "✓ Granted baseline permissions to fallback role");
        Ok(())
    }
}

fn placeholder_address() -> Address {
    Address {
        address: NOT_INFORMED.to_string(),
        city: NOT_INFORMED.to_string(),
        state: "NI".to_string(),
        zip_code: "00000-000".to_string(),
    }
}
