//! This module defines the `TargetRepository` trait, the insert-only view of
//! the normalized target database.
//!
//! Every lookup is by natural key. Nothing in this interface updates or
//! deletes a row.
use school_migrator_shared::{
    NewCollection, NewFile, NewInstitution, NewRole, NewSchool, NewUser,
};
use uuid::Uuid;

use crate::errors::TargetRepositoryError;

/// Natural-key lookups and single-row inserts against the target schema.
#[async_trait::async_trait]
pub trait TargetRepository: Send + Sync {
    /// Looks up a role by its unique name.
    async fn find_role_id(&self, name: &str) -> Result<Option<Uuid>, TargetRepositoryError>;

    async fn insert_role(&self, role: &NewRole) -> Result<(), TargetRepositoryError>;

    /// Looks up an institution by its code.
    async fn find_institution_id(&self, code: &str)
    -> Result<Option<Uuid>, TargetRepositoryError>;

    async fn insert_institution(
        &self,
        institution: &NewInstitution,
    ) -> Result<(), TargetRepositoryError>;

    /// Looks up a school by its code.
    async fn find_school_id(&self, code: &str) -> Result<Option<Uuid>, TargetRepositoryError>;

    async fn insert_school(&self, school: &NewSchool) -> Result<(), TargetRepositoryError>;

    /// Counts the permission grants linked to a role.
    async fn count_role_permissions(&self, role_id: Uuid) -> Result<i64, TargetRepositoryError>;

    /// Resolves permission names to ids. Unknown names are simply absent from the result.
    async fn find_permission_ids(&self, names: &[&str]) -> Result<Vec<Uuid>, TargetRepositoryError>;

    /// Links a role to every given permission in a single statement.
    ///
    /// # Arguments
    ///
    /// * `role_id` - Role receiving the grants
    /// * `permission_ids` - Permissions to grant (empty slices are no-ops)
    async fn insert_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> Result<(), TargetRepositoryError>;

    /// Checks whether a user with this email already exists.
    async fn user_exists(&self, email: &str) -> Result<bool, TargetRepositoryError>;

    async fn insert_user(&self, user: &NewUser) -> Result<(), TargetRepositoryError>;

    /// Checks whether a file with this storage key already exists.
    async fn file_exists(&self, s3_key: &str) -> Result<bool, TargetRepositoryError>;

    async fn insert_file(&self, file: &NewFile) -> Result<(), TargetRepositoryError>;

    /// Checks whether a collection with this name already exists.
    async fn collection_exists(&self, name: &str) -> Result<bool, TargetRepositoryError>;

    async fn insert_collection(&self, collection: &NewCollection)
    -> Result<(), TargetRepositoryError>;

    /// Releases the underlying connection handle.
    async fn close(&self);
}
