//! PostgreSQL implementation of the target repository.
//!
//! Provides the natural-key lookups and single-row inserts the migrators
//! need. Every insert is its own statement, so a failed row never rolls back
//! rows inserted before it.
//!
//! ## Database Tables
//!
//! - `roles`, `permissions`, `role_permissions`: access control reference data
//! - `institutions`, `schools`: organisational hierarchy
//! - `users`, `files`, `collections`: migrated content
use async_trait::async_trait;
use school_migrator_shared::{
    NewCollection, NewFile, NewInstitution, NewRole, NewSchool, NewUser,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{TargetRepository, TargetRepositoryError};

/// PostgreSQL implementation of the target repository.
pub struct PostgresTargetRepository {
    pool: PgPool,
}

impl PostgresTargetRepository {
    /// Wraps an existing pool whose schema already contains the target tables.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against the target database.
    ///
    /// # Arguments
    ///
    /// * `database_url` - PostgreSQL connection string
    /// * `max_connections` - Pool size
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresTargetRepository)` - Connected repository
    /// * `Err(TargetRepositoryError)` - The database is unreachable
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, TargetRepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Runs an existence probe of the form `SELECT EXISTS(...)` with one bound key.
    async fn exists(&self, sql: &str, key: &str) -> Result<bool, TargetRepositoryError> {
        let exists: bool = sqlx::query_scalar(sql)
            .bind(key)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl TargetRepository for PostgresTargetRepository {
    async fn find_role_id(&self, name: &str) -> Result<Option<Uuid>, TargetRepositoryError> {
        let id = sqlx::query_scalar("SELECT id FROM roles WHERE name = $1 LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn insert_role(&self, role: &NewRole) -> Result<(), TargetRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO roles (id, name, description, type, status, user_count)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(&role.role_type)
        .bind(&role.status)
        .bind(role.user_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_institution_id(
        &self,
        code: &str,
    ) -> Result<Option<Uuid>, TargetRepositoryError> {
        let id = sqlx::query_scalar("SELECT id FROM institutions WHERE code = $1 LIMIT 1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn insert_institution(
        &self,
        institution: &NewInstitution,
    ) -> Result<(), TargetRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO institutions
                (id, name, code, description, address, city, state, zip_code,
                 phone, email, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(institution.id)
        .bind(&institution.name)
        .bind(&institution.code)
        .bind(&institution.description)
        .bind(&institution.address.address)
        .bind(&institution.address.city)
        .bind(&institution.address.state)
        .bind(&institution.address.zip_code)
        .bind(&institution.phone)
        .bind(&institution.email)
        .bind(&institution.status)
        .bind(institution.created_at)
        .bind(institution.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_school_id(&self, code: &str) -> Result<Option<Uuid>, TargetRepositoryError> {
        let id = sqlx::query_scalar("SELECT id FROM schools WHERE code = $1 LIMIT 1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn insert_school(&self, school: &NewSchool) -> Result<(), TargetRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO schools
                (id, name, code, description, address, city, state, zip_code,
                 institution_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(school.id)
        .bind(&school.name)
        .bind(&school.code)
        .bind(&school.description)
        .bind(&school.address.address)
        .bind(&school.address.city)
        .bind(&school.address.state)
        .bind(&school.address.zip_code)
        .bind(school.institution_id)
        .bind(&school.status)
        .bind(school.created_at)
        .bind(school.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count_role_permissions(&self, role_id: Uuid) -> Result<i64, TargetRepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM role_permissions WHERE role_id = $1")
                .bind(role_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn find_permission_ids(
        &self,
        names: &[&str],
    ) -> Result<Vec<Uuid>, TargetRepositoryError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        let ids =
            sqlx::query_scalar("SELECT id FROM permissions WHERE name = ANY($1) ORDER BY name")
                .bind(&names)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    async fn insert_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> Result<(), TargetRepositoryError> {
        if permission_ids.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        let mut query_builder =
            sqlx::QueryBuilder::new("INSERT INTO role_permissions (role_id, permission_id) ");
        query_builder.push_values(permission_ids, |mut b, permission_id| {
            b.push_bind(role_id).push_bind(*permission_id);
        });
        query_builder.push(" ON CONFLICT DO NOTHING");

        query_builder.build().execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn user_exists(&self, email: &str) -> Result<bool, TargetRepositoryError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)", email)
            .await
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), TargetRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users
                (id, email, password, name, cpf, phone, birth_date,
                 address, city, state, zip_code, is_active,
                 role_id, institution_id, school_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.name)
        .bind(&user.cpf)
        .bind(&user.phone)
        .bind(user.birth_date)
        .bind(&user.address.address)
        .bind(&user.address.city)
        .bind(&user.address.state)
        .bind(&user.address.zip_code)
        .bind(user.is_active)
        .bind(user.role_id)
        .bind(user.institution_id)
        .bind(user.school_id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn file_exists(&self, s3_key: &str) -> Result<bool, TargetRepositoryError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM files WHERE s3_key = $1)", s3_key)
            .await
    }

    async fn insert_file(&self, file: &NewFile) -> Result<(), TargetRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO files
                (id, name, original_name, type, size, size_formatted, bucket,
                 s3_key, s3_url, description, category, metadata, uploaded_by,
                 is_active, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(file.id)
        .bind(&file.name)
        .bind(&file.original_name)
        .bind(&file.file_type)
        .bind(file.size)
        .bind(&file.size_formatted)
        .bind(&file.bucket)
        .bind(&file.s3_key)
        .bind(&file.s3_url)
        .bind(&file.description)
        .bind(&file.category)
        .bind(Json(&file.metadata))
        .bind(file.uploaded_by)
        .bind(file.is_active)
        .bind(&file.tags)
        .bind(file.created_at)
        .bind(file.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, TargetRepositoryError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM collections WHERE name = $1)", name)
            .await
    }

    async fn insert_collection(
        &self,
        collection: &NewCollection,
    ) -> Result<(), TargetRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO collections
                (id, name, description, type, created_by, institution_id,
                 is_public, items_count, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(collection.id)
        .bind(&collection.name)
        .bind(&collection.description)
        .bind(&collection.collection_type)
        .bind(collection.created_by)
        .bind(collection.institution_id)
        .bind(collection.is_public)
        .bind(collection.items_count)
        .bind(&collection.tags)
        .bind(collection.created_at)
        .bind(collection.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
