//! Column-by-column decoding of MySQL rows into `LegacyRow`s.
//!
//! The legacy schema is not known at compile time, so each column is decoded
//! according to its declared type. Values that refuse to decode as their
//! declared type fall back to text, then to lossy UTF-8 bytes.
//! MySQL zero dates fail every attempt and end up absent.
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use school_migrator_shared::LegacyRow;
use serde_json::{Number, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo};
use tracing::debug;

/// Converts a MySQL row into a `LegacyRow`. NULL columns are omitted.
pub fn decode_row(row: &MySqlRow) -> LegacyRow {
    let mut legacy = LegacyRow::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.type_info().name());
        legacy.insert(column.name(), value);
    }
    legacy
}

fn decode_column(row: &MySqlRow, idx: usize, type_name: &str) -> Value {
    let type_name = type_name.to_ascii_uppercase();

    let decoded = match type_name.as_str() {
        "BOOLEAN" => row.try_get::<Option<bool>, _>(idx).map(|v| v.map(Value::Bool)),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => row
            .try_get::<Option<i64>, _>(idx)
            .map(|v| v.map(|n| Value::Number(n.into()))),
        t if t.ends_with("UNSIGNED") => row
            .try_get::<Option<u64>, _>(idx)
            .map(|v| v.map(|n| Value::Number(n.into()))),
        "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(idx)
            .map(|v| v.and_then(Number::from_f64).map(Value::Number)),
        "DECIMAL" => row
            .try_get::<Option<BigDecimal>, _>(idx)
            .map(|v| v.map(|d| Value::String(d.normalized().to_string()))),
        "DATETIME" | "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .map(|v| v.map(|ts| Value::String(ts.to_string()))),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(idx)
            .map(|v| v.map(|d| Value::String(d.to_string()))),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(idx)
            .map(|v| v.map(|t| Value::String(t.to_string()))),
        "JSON" => row.try_get::<Option<Value>, _>(idx),
        _ => row.try_get::<Option<String>, _>(idx).map(|v| v.map(Value::String)),
    };

    match decoded {
        Ok(value) => value.unwrap_or(Value::Null),
        Err(e) => {
            debug!(
                column = idx,
                type_name = %type_name,
                error = %e,
                "Falling back to text decoding"
            );
            decode_fallback(row, idx)
        }
    }
}

fn decode_fallback(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(text) = row.try_get::<Option<String>, _>(idx) {
        return text.map(Value::String).unwrap_or(Value::Null);
    }
    match row.try_get::<Option<Vec<u8>>, _>(idx) {
        Ok(bytes) => bytes
            .map(|b| Value::String(String::from_utf8_lossy(&b).into_owned()))
            .unwrap_or(Value::Null),
        Err(_) => Value::Null,
    }
}
