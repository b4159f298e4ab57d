//! In-memory doubles of the legacy source and the target repository.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use school_migrator::errors::PasswordHashError;
use school_migrator::password::PasswordHasher;
use school_migrator_repository::{
    LegacySource, LegacySourceError, TargetRepository, TargetRepositoryError,
};
use school_migrator_shared::{
    LegacyRow, NewCollection, NewFile, NewInstitution, NewRole, NewSchool, NewUser,
};
use serde_json::Value;
use uuid::Uuid;

pub fn rows(values: Vec<Value>) -> Vec<LegacyRow> {
    values.into_iter().map(LegacyRow::from_json).collect()
}

fn mock_error(message: &str) -> sqlx::Error {
    sqlx::Error::Protocol(message.to_string())
}

// Mock legacy database
#[derive(Default)]
pub struct MockSource {
    tables: HashMap<String, Vec<LegacyRow>>,
    unreadable: HashSet<String>,
    pub closes: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str, rows: Vec<LegacyRow>) -> Self {
        self.tables.insert(table.to_string(), rows);
        self
    }

    /// Table that exists but fails to be read.
    pub fn with_unreadable_table(mut self, table: &str) -> Self {
        self.tables.insert(table.to_string(), Vec::new());
        self.unreadable.insert(table.to_string());
        self
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LegacySource for MockSource {
    async fn table_exists(&self, table: &str) -> Result<bool, LegacySourceError> {
        Ok(self.tables.contains_key(table))
    }

    async fn fetch_rows(&self, table: &str) -> Result<Vec<LegacyRow>, LegacySourceError> {
        if self.unreadable.contains(table) {
            return Err(LegacySourceError::DatabaseError(mock_error("table is corrupted")));
        }
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct TargetState {
    pub roles: Vec<NewRole>,
    pub institutions: Vec<NewInstitution>,
    pub schools: Vec<NewSchool>,
    pub users: Vec<NewUser>,
    pub files: Vec<NewFile>,
    pub collections: Vec<NewCollection>,
    pub permission_catalog: HashMap<String, Uuid>,
    pub role_permissions: Vec<(Uuid, Uuid)>,
}

// Mock target database
#[derive(Default)]
pub struct MockTarget {
    pub state: Mutex<TargetState>,
    failing_emails: HashSet<String>,
    fail_role_lookup: bool,
    pub closes: AtomicUsize,
}

impl MockTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target whose permission catalog holds the given names.
    pub fn with_permissions(names: &[&str]) -> Self {
        let target = Self::new();
        {
            let mut state = target.state.lock().unwrap();
            for name in names {
                state.permission_catalog.insert(name.to_string(), Uuid::new_v4());
            }
        }
        target
    }

    /// Inserting a user with this email fails.
    pub fn failing_on_email(mut self, email: &str) -> Self {
        self.failing_emails.insert(email.to_string());
        self
    }

    /// Every role lookup fails, which breaks the bootstrap.
    pub fn failing_role_lookup(mut self) -> Self {
        self.fail_role_lookup = true;
        self
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn users(&self) -> Vec<NewUser> {
        self.state.lock().unwrap().users.clone()
    }

    pub fn institutions(&self) -> Vec<NewInstitution> {
        self.state.lock().unwrap().institutions.clone()
    }

    pub fn schools(&self) -> Vec<NewSchool> {
        self.state.lock().unwrap().schools.clone()
    }

    pub fn files(&self) -> Vec<NewFile> {
        self.state.lock().unwrap().files.clone()
    }

    pub fn collections(&self) -> Vec<NewCollection> {
        self.state.lock().unwrap().collections.clone()
    }

    pub fn role_permission_count(&self) -> usize {
        self.state.lock().unwrap().role_permissions.len()
    }
}

#[async_trait::async_trait]
impl TargetRepository for MockTarget {
    async fn find_role_id(&self, name: &str) -> Result<Option<Uuid>, TargetRepositoryError> {
        if self.fail_role_lookup {
            return Err(mock_error("roles table is locked").into());
        }
        let state = self.state.lock().unwrap();
        Ok(state.roles.iter().find(|r| r.name == name).map(|r| r.id))
    }

    async fn insert_role(&self, role: &NewRole) -> Result<(), TargetRepositoryError> {
        self.state.lock().unwrap().roles.push(role.clone());
        Ok(())
    }

    async fn find_institution_id(&self, code: &str) -> Result<Option<Uuid>, TargetRepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.institutions.iter().find(|i| i.code == code).map(|i| i.id))
    }

    async fn insert_institution(
        &self,
        institution: &NewInstitution,
    ) -> Result<(), TargetRepositoryError> {
        self.state.lock().unwrap().institutions.push(institution.clone());
        Ok(())
    }

    async fn find_school_id(&self, code: &str) -> Result<Option<Uuid>, TargetRepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.schools.iter().find(|s| s.code == code).map(|s| s.id))
    }

    async fn insert_school(&self, school: &NewSchool) -> Result<(), TargetRepositoryError> {
        self.state.lock().unwrap().schools.push(school.clone());
        Ok(())
    }

    async fn count_role_permissions(&self, role_id: Uuid) -> Result<i64, TargetRepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.role_permissions.iter().filter(|(r, _)| *r == role_id).count() as i64)
    }

    async fn find_permission_ids(
        &self,
        names: &[&str],
    ) -> Result<Vec<Uuid>, TargetRepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(names
            .iter()
            .filter_map(|name| state.permission_catalog.get(*name).copied())
            .collect())
    }

    async fn insert_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> Result<(), TargetRepositoryError> {
        let mut state = self.state.lock().unwrap();
        for permission_id in permission_ids {
            if !state.role_permissions.contains(&(role_id, *permission_id)) {
                state.role_permissions.push((role_id, *permission_id));
            }
        }
        Ok(())
    }

    async fn user_exists(&self, email: &str) -> Result<bool, TargetRepositoryError> {
        Ok(self.state.lock().unwrap().users.iter().any(|u| u.email == email))
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), TargetRepositoryError> {
        if self.failing_emails.contains(&user.email) {
            return Err(mock_error("users_cpf_key violated").into());
        }
        self.state.lock().unwrap().users.push(user.clone());
        Ok(())
    }

    async fn file_exists(&self, s3_key: &str) -> Result<bool, TargetRepositoryError> {
        Ok(self.state.lock().unwrap().files.iter().any(|f| f.s3_key == s3_key))
    }

    async fn insert_file(&self, file: &NewFile) -> Result<(), TargetRepositoryError> {
        self.state.lock().unwrap().files.push(file.clone());
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, TargetRepositoryError> {
        Ok(self.state.lock().unwrap().collections.iter().any(|c| c.name == name))
    }

    async fn insert_collection(
        &self,
        collection: &NewCollection,
    ) -> Result<(), TargetRepositoryError> {
        self.state.lock().unwrap().collections.push(collection.clone());
        Ok(())
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Deterministic hasher; Argon2 is too slow for per-test use.
pub struct FakeHasher;

pub const FAKE_HASH_PREFIX: &str = "fake-hash:";

impl PasswordHasher for FakeHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{FAKE_HASH_PREFIX}{plain}"))
    }
}
