//! Insert records for the target (PostgreSQL) schema.
//!
//! Each record is fully reconciled: every field has already been resolved
//! from its legacy aliases or replaced by a default, and foreign keys point at
//! rows known to exist in the target.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// Postal address block shared by institutions, schools and users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRole {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub role_type: String,
    pub status: String,
    pub user_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInstitution {
    pub id: Uuid,
    pub name: String,
    /// Natural key.
    pub code: String,
    pub description: String,
    pub address: Address,
    pub phone: String,
    pub email: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchool {
    pub id: Uuid,
    pub name: String,
    /// Natural key.
    pub code: String,
    pub description: String,
    pub address: Address,
    pub institution_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub id: Uuid,
    /// Natural key.
    pub email: String,
    /// Password hash, never a plain password.
    pub password: String,
    pub name: String,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Address,
    pub is_active: bool,
    pub role_id: Uuid,
    pub institution_id: Uuid,
    pub school_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFile {
    pub id: Uuid,
    pub name: String,
    pub original_name: String,
    pub file_type: String,
    pub size: i64,
    pub size_formatted: String,
    pub bucket: String,
    /// Natural key.
    pub s3_key: String,
    pub s3_url: String,
    pub description: String,
    pub category: String,
    pub metadata: Value,
    pub uploaded_by: Option<Uuid>,
    pub is_active: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCollection {
    pub id: Uuid,
    /// Natural key.
    pub name: String,
    pub description: String,
    pub collection_type: String,
    pub created_by: Option<Uuid>,
    pub institution_id: Uuid,
    pub is_public: bool,
    pub items_count: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
