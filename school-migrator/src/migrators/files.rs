//! Files migrator: `arquivos` → `files`, keyed by storage key.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_migrator_repository::{TargetRepository, TargetRepositoryError};
use school_migrator_shared::{EntityKind, LegacyRow, NewFile};
use serde_json::{Value, json};
use tracing::warn;
use uuid::Uuid;

use super::{
    EntityMigrator, NOT_INFORMED, fields, is_active, key_or_synthesized, text_or, timestamps,
};
use crate::errors::RowError;

const SYNTHESIZED_KEY_PREFIX: &str = "migrated/";
const DEFAULT_FILE_TYPE: &str = "application/octet-stream";
const DEFAULT_BUCKET: &str = "legacy";
const DEFAULT_CATEGORY: &str = "general";

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

#[derive(Debug, Default)]
pub struct FilesMigrator;

impl FilesMigrator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the target row from a legacy row.
    pub fn transform(&self, row: &LegacyRow, s3_key: String, now: DateTime<Utc>) -> NewFile {
        let (created_at, updated_at) = timestamps(row, now);
        let size = row.integer(&fields::SIZE).unwrap_or(0).max(0);
        let name = row
            .text(&fields::NAME)
            .or_else(|| row.text(&fields::ORIGINAL_NAME))
            .unwrap_or_else(|| NOT_INFORMED.to_string());

        NewFile {
            id: Uuid::new_v4(),
            original_name: text_or(row, &fields::ORIGINAL_NAME, &name),
            name,
            file_type: text_or(row, &fields::FILE_TYPE, DEFAULT_FILE_TYPE),
            size,
            size_formatted: row
                .text(&fields::SIZE_FORMATTED)
                .unwrap_or_else(|| format_size(size)),
            bucket: text_or(row, &fields::BUCKET, DEFAULT_BUCKET),
            s3_url: text_or(row, &fields::S3_URL, NOT_INFORMED),
            description: text_or(row, &fields::DESCRIPTION, NOT_INFORMED),
            category: text_or(row, &fields::CATEGORY, DEFAULT_CATEGORY),
            metadata: metadata(row),
            uploaded_by: None,
            is_active: is_active(row),
            tags: row.list(&fields::TAGS),
            s3_key,
            created_at,
            updated_at,
        }
    }
}

/// Parsed metadata object; malformed or non-object values become `{}`.
fn metadata(row: &LegacyRow) -> Value {
    match row.json(&fields::METADATA) {
        Ok(Some(value @ Value::Object(_))) => value,
        Ok(Some(other)) => {
            warn!(
                legacy_id = row.legacy_id().as_deref().unwrap_or("unknown"),
                "File metadata is not an object, wrapping it"
            );
            json!({ "value": other })
        }
        Ok(None) => json!({}),
        Err(e) => {
            warn!(
                legacy_id = row.legacy_id().as_deref().unwrap_or("unknown"),
                error = %e,
                "Malformed file metadata, storing empty object"
            );
            json!({})
        }
    }
}

/// Human readable size in binary units, e.g. `512 B`, `1.5 KB`, `2.0 MB`.
pub fn format_size(bytes: i64) -> String {
    let mut value = bytes.max(0) as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes.max(0), SIZE_UNITS[0])
    } else {
        format!("{:.1} {}", value, SIZE_UNITS[unit])
    }
}

#[async_trait]
impl EntityMigrator for FilesMigrator {
    fn kind(&self) -> EntityKind {
        EntityKind::Files
    }

    fn natural_key(&self, row: &LegacyRow) -> Result<String, RowError> {
        key_or_synthesized(row, &fields::S3_KEY, SYNTHESIZED_KEY_PREFIX)
    }

    async fn exists(
        &self,
        target: &dyn TargetRepository,
        key: &str,
    ) -> Result<bool, TargetRepositoryError> {
        target.file_exists(key).await
    }

    async fn insert(
        &self,
        target: &dyn TargetRepository,
        row: &LegacyRow,
        key: String,
    ) -> Result<(), RowError> {
        let file = self.transform(row, key, Utc::now());
        target.insert_file(&file).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_size(-10), "0 B");
    }

    #[test]
    fn test_key_fallback() {
        let row = LegacyRow::from_json(json!({ "id": 12, "nome": "prova.pdf" }));
        assert_eq!(FilesMigrator::new().natural_key(&row).unwrap(), "migrated/12");
    }

    #[test]
    fn test_transform_full_row() {
        let row = LegacyRow::from_json(json!({
            "id": 1,
            "nome": "aula1.pdf",
            "tipo": "application/pdf",
            "tamanho": 1536,
            "bucket": "escola",
            "chave_s3": "docs/aula1.pdf",
            "metadados": "{\"paginas\": 10}",
            "tags": "matematica, algebra,"
        }));

        let file = FilesMigrator::new().transform(&row, "docs/aula1.pdf".to_string(), Utc::now());

        assert_eq!(file.name, "aula1.pdf");
        assert_eq!(file.original_name, "aula1.pdf");
        assert_eq!(file.file_type, "application/pdf");
        assert_eq!(file.size, 1536);
        assert_eq!(file.size_formatted, "1.5 KB");
        assert_eq!(file.bucket, "escola");
        assert_eq!(file.metadata, json!({ "paginas": 10 }));
        assert_eq!(file.tags, vec!["matematica", "algebra"]);
        assert_eq!(file.uploaded_by, None);
        assert!(file.is_active);
    }

    #[test]
    fn test_transform_sparse_row() {
        let row = LegacyRow::from_json(json!({ "id": 5, "metadados": "{not json" }));

        let file = FilesMigrator::new().transform(&row, "migrated/5".to_string(), Utc::now());

        assert_eq!(file.name, NOT_INFORMED);
        assert_eq!(file.original_name, NOT_INFORMED);
        assert_eq!(file.file_type, DEFAULT_FILE_TYPE);
        assert_eq!(file.size, 0);
        assert_eq!(file.size_formatted, "0 B");
        assert_eq!(file.bucket, DEFAULT_BUCKET);
        assert_eq!(file.s3_url, NOT_INFORMED);
        assert_eq!(file.category, DEFAULT_CATEGORY);
        assert_eq!(file.metadata, json!({}));
        assert!(file.tags.is_empty());
    }

    #[test]
    fn test_name_from_original_name() {
        let row = LegacyRow::from_json(json!({ "id": 6, "nome_original": "Prova Final.docx" }));
        let file = FilesMigrator::new().transform(&row, "migrated/6".to_string(), Utc::now());

        assert_eq!(file.name, "Prova Final.docx");
        assert_eq!(file.original_name, "Prova Final.docx");
    }

    #[test]
    fn test_native_json_tags() {
        let row = LegacyRow::from_json(json!({ "tags": ["a", " b ", ""] }));
        let file = FilesMigrator::new().transform(&row, "k".to_string(), Utc::now());
        assert_eq!(file.tags, vec!["a", "b"]);
    }
}
