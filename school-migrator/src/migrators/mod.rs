//! Entity migrators and the row loop they share.
//!
//! A migrator only knows how to key and transform rows of one legacy table.
//! `migrate_entity` drives it through the same sequence for every entity:
//! probe the source table, fetch all rows, then for each row resolve the
//! natural key, skip it if the target already has it, otherwise transform
//! and insert. A failing row is counted and logged, and the loop moves on.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_migrator_repository::{LegacySource, TargetRepository, TargetRepositoryError};
use school_migrator_shared::{
    Address, EntityKind, EntityStats, Field, LegacyRow, STATUS_ACTIVE, STATUS_INACTIVE,
};
use tracing::{error, info, instrument, warn};

use crate::errors::RowError;

pub mod collections;
pub mod fields;
pub mod files;
pub mod institutions;
pub mod schools;
pub mod users;

pub use collections::CollectionsMigrator;
pub use files::FilesMigrator;
pub use institutions::InstitutionsMigrator;
pub use schools::SchoolsMigrator;
pub use users::UsersMigrator;

/// Placeholder for required text the legacy row does not provide.
pub const NOT_INFORMED: &str = "Não informado";

/// Progress line interval, in rows.
pub const ROW_REPORT_INTERVAL: usize = 100;

/// Per-entity keying and transformation.
#[async_trait]
pub trait EntityMigrator: Send + Sync {
    fn kind(&self) -> EntityKind;

    /// Computes the target natural key of a legacy row.
    fn natural_key(&self, row: &LegacyRow) -> Result<String, RowError>;

    /// Checks whether the target already holds a row with this natural key.
    async fn exists(
        &self,
        target: &dyn TargetRepository,
        key: &str,
    ) -> Result<bool, TargetRepositoryError>;

    /// Transforms the legacy row and inserts it under the given natural key.
    async fn insert(
        &self,
        target: &dyn TargetRepository,
        row: &LegacyRow,
        key: String,
    ) -> Result<(), RowError>;
}

enum RowOutcome {
    Migrated,
    Skipped,
}

/// Runs one migrator over its whole legacy table.
///
/// Never fails: a missing table yields zero counts, an unreadable table is
/// logged and yields zero counts, and row failures are counted as errors.
#[instrument(skip_all, fields(entity = %migrator.kind()))]
pub async fn migrate_entity(
    source: &dyn LegacySource,
    target: &dyn TargetRepository,
    migrator: &dyn EntityMigrator,
) -> EntityStats {
    let kind = migrator.kind();
    let table = kind.source_table();

    info!("\n=== Migrating {} ===", kind);

    match source.table_exists(table).await {
        Ok(true) => {}
        Ok(false) => {
            warn!(table, "Legacy table not found, nothing to migrate");
            return EntityStats::default();
        }
        Err(e) => {
            error!(table, error = %e, "Failed to probe legacy table");
            return EntityStats::default();
        }
    }

    let rows = match source.fetch_rows(table).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(table, error = %e, "Failed to read legacy table");
            return EntityStats::default();
        }
    };

    let total = rows.len();
    info!(
        table,
        target = kind.target_table(),
        rows = total,
        "Found {} legacy rows for {}",
        total,
        kind.target_table()
    );

    let mut stats = EntityStats::default();
    for (idx, row) in rows.iter().enumerate() {
        stats = match migrate_row(target, migrator, row).await {
            Ok(RowOutcome::Migrated) => stats.with_migrated(),
            Ok(RowOutcome::Skipped) => stats.with_skipped(),
            Err(e) => {
                error!(
                    legacy_id = row.legacy_id().as_deref().unwrap_or("unknown"),
                    error = %e,
                    "Failed to migrate row"
                );
                stats.with_error()
            }
        };

        let current = idx + 1;
        if current % ROW_REPORT_INTERVAL == 0 || current == total {
            info!("  Progress: {}/{} rows", current, total);
        }
    }

    info!(
        migrated = stats.migrated,
        skipped = stats.skipped,
        errors = stats.errors,
        "✓ {}: {} migrated, {} skipped, {} errors",
        kind,
        stats.migrated,
        stats.skipped,
        stats.errors
    );

    stats
}

async fn migrate_row(
    target: &dyn TargetRepository,
    migrator: &dyn EntityMigrator,
    row: &LegacyRow,
) -> Result<RowOutcome, RowError> {
    let key = migrator.natural_key(row)?;
    if migrator.exists(target, &key).await? {
        return Ok(RowOutcome::Skipped);
    }
    migrator.insert(target, row, key).await?;
    Ok(RowOutcome::Migrated)
}

/// Text of a field, or a default when absent.
pub(crate) fn text_or(row: &LegacyRow, field: &Field, default: &str) -> String {
    row.text(field).unwrap_or_else(|| default.to_string())
}

/// Explicit key if present, else `{prefix}{legacy id}`.
pub(crate) fn key_or_synthesized(
    row: &LegacyRow,
    field: &Field,
    prefix: &str,
) -> Result<String, RowError> {
    if let Some(key) = row.text(field) {
        return Ok(key);
    }
    row.legacy_id()
        .map(|id| format!("{}{}", prefix, id))
        .ok_or(RowError::MissingField(field.primary()))
}

pub(crate) fn address(row: &LegacyRow) -> Address {
    Address {
        address: text_or(row, &fields::ADDRESS, NOT_INFORMED),
        city: text_or(row, &fields::CITY, NOT_INFORMED),
        state: text_or(row, &fields::STATE, "NI"),
        zip_code: text_or(row, &fields::ZIP_CODE, "00000-000"),
    }
}

/// `active` / `inactive` from an explicit status column, else from the active flag.
pub(crate) fn status(row: &LegacyRow) -> String {
    if let Some(status) = row.text(&fields::STATUS) {
        let lowered = status.to_lowercase();
        return match lowered.as_str() {
            "inativo" | "inativa" | "inactive" | "0" | "false" => STATUS_INACTIVE.to_string(),
            _ => STATUS_ACTIVE.to_string(),
        };
    }
    if is_active(row) {
        STATUS_ACTIVE.to_string()
    } else {
        STATUS_INACTIVE.to_string()
    }
}

/// Active unless the legacy flag is explicitly falsy.
pub(crate) fn is_active(row: &LegacyRow) -> bool {
    row.flag(&fields::ACTIVE).unwrap_or(true)
}

/// Creation and update timestamps, each defaulting to `now`.
pub(crate) fn timestamps(row: &LegacyRow, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        row.timestamp(&fields::CREATED_AT).unwrap_or(now),
        row.timestamp(&fields::UPDATED_AT).unwrap_or(now),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_key_wins() {
        let row = LegacyRow::from_json(json!({ "id": 7, "codigo": "ESC-01" }));
        assert_eq!(key_or_synthesized(&row, &fields::CODE, "SCHOOL_").unwrap(), "ESC-01");
    }

    #[test]
    fn test_synthesized_key_from_id() {
        let row = LegacyRow::from_json(json!({ "id": 7 }));
        assert_eq!(key_or_synthesized(&row, &fields::CODE, "SCHOOL_").unwrap(), "SCHOOL_7");
    }

    #[test]
    fn test_no_key_and_no_id() {
        let row = LegacyRow::from_json(json!({ "nome": "Sem id" }));
        assert!(matches!(
            key_or_synthesized(&row, &fields::CODE, "SCHOOL_"),
            Err(RowError::MissingField("codigo"))
        ));
    }

    #[test]
    fn test_status_resolution() {
        assert_eq!(status(&LegacyRow::new()), STATUS_ACTIVE);
        assert_eq!(status(&LegacyRow::from_json(json!({ "ativo": 0 }))), STATUS_INACTIVE);
        assert_eq!(
            status(&LegacyRow::from_json(json!({ "status": "Inativo", "ativo": 1 }))),
            STATUS_INACTIVE
        );
        assert_eq!(status(&LegacyRow::from_json(json!({ "situacao": "ativa" }))), STATUS_ACTIVE);
    }

    #[test]
    fn test_address_placeholders() {
        let address = address(&LegacyRow::from_json(json!({ "cidade": "Olinda", "uf": "PE" })));
        assert_eq!(address.city, "Olinda");
        assert_eq!(address.state, "PE");
        assert_eq!(address.address, NOT_INFORMED);
        assert_eq!(address.zip_code, "00000-000");
    }

    #[test]
    fn test_timestamps_default_to_now() {
        let now = Utc::now();
        let (created, updated) = timestamps(&LegacyRow::new(), now);
        assert_eq!(created, now);
        assert_eq!(updated, now);
    }
}
