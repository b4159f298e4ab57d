//! Loosely typed row read from the legacy database.
//!
//! The legacy schema is treated as an untyped source: a row is a map from
//! column name to JSON value, and typed accessors reconcile the value with
//! what the target schema expects. NULL columns are never stored, so
//! "absent" and "NULL" are the same thing for every accessor.
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Field;

const ID: Field = Field::new(&["id"]);

/// Strings treated as a false flag, compared case-insensitively after trimming.
const FALSY_STRINGS: &[&str] = &[
    "0", "false", "f", "n", "no", "nao", "não", "inativo", "inactive",
];

/// Naive datetime layouts found in MySQL exports, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

/// Date layouts, ISO first, then the Brazilian day-first form.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// A single row of a legacy table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyRow {
    columns: Map<String, Value>,
}

impl LegacyRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from a JSON object. Non-object values produce an empty row.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(columns) => Self::from(columns),
            _ => Self::new(),
        }
    }

    /// Sets a column. NULL values are dropped.
    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        if !value.is_null() {
            self.columns.insert(column.into(), value);
        }
    }

    /// Raw access to one column by exact name.
    pub fn column(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    /// Column names present in this row.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolves a field: the first alias holding a usable value wins.
    ///
    /// Blank strings are skipped so that an empty Portuguese column does not
    /// shadow a filled English one.
    pub fn value(&self, field: &Field) -> Option<&Value> {
        field.names.iter().find_map(|name| match self.columns.get(*name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        })
    }

    /// Resolves a field as trimmed text. Numbers and booleans are stringified.
    pub fn text(&self, field: &Field) -> Option<String> {
        self.value(field).map(|value| match value {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        })
    }

    /// Resolves a field as a boolean flag.
    ///
    /// Numbers are false only when zero; strings are false when they read as
    /// a negative (`0`, `false`, `não`, `inativo`, ...).
    pub fn flag(&self, field: &Field) -> Option<bool> {
        match self.value(field)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(n.as_f64().map(|f| f != 0.0).unwrap_or(true)),
            Value::String(s) => {
                let lowered = s.trim().to_lowercase();
                Some(!FALSY_STRINGS.contains(&lowered.as_str()))
            }
            Value::Array(items) => Some(!items.is_empty()),
            Value::Object(map) => Some(!map.is_empty()),
            Value::Null => None,
        }
    }

    /// Resolves a field as an integer. Fractional values are truncated.
    pub fn integer(&self, field: &Field) -> Option<i64> {
        match self.value(field)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
            }
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Resolves a field as a UTC timestamp.
    ///
    /// Accepts RFC 3339 strings, naive MySQL datetimes (taken as UTC), bare
    /// dates (midnight UTC) and unix timestamps in seconds.
    pub fn timestamp(&self, field: &Field) -> Option<DateTime<Utc>> {
        match self.value(field)? {
            Value::String(s) => parse_timestamp(s.trim()),
            Value::Number(n) => n.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
            _ => None,
        }
    }

    /// Resolves a field as a calendar date.
    pub fn date(&self, field: &Field) -> Option<NaiveDate> {
        match self.value(field)? {
            Value::String(s) => {
                let s = s.trim();
                DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
                    .or_else(|| parse_timestamp(s).map(|ts| ts.date_naive()))
            }
            _ => self.timestamp(field).map(|ts| ts.date_naive()),
        }
    }

    /// Resolves a field holding JSON, either natively or as an encoded string.
    ///
    /// Returns `Ok(None)` when the field is absent and `Err` when a string
    /// value is not valid JSON.
    pub fn json(&self, field: &Field) -> Result<Option<Value>, serde_json::Error> {
        match self.value(field) {
            None => Ok(None),
            Some(Value::String(s)) => serde_json::from_str(s).map(Some),
            Some(other) => Ok(Some(other.clone())),
        }
    }

    /// Resolves a field as a list of strings.
    ///
    /// Accepts a JSON array, a JSON-encoded array string, a comma separated
    /// string or a single scalar. Entries are trimmed and empty ones dropped.
    pub fn list(&self, field: &Field) -> Vec<String> {
        let items: Vec<String> = match self.value(field) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(Value::String(s)) => {
                let s = s.trim();
                match serde_json::from_str::<Value>(s) {
                    Ok(Value::Array(items)) if s.starts_with('[') => {
                        items.iter().filter_map(scalar_text).collect()
                    }
                    _ => s.split(',').map(str::to_string).collect(),
                }
            }
            Some(other) => scalar_text(other).into_iter().collect(),
        };

        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// The legacy primary key, used for key synthesis and error reporting.
    pub fn legacy_id(&self) -> Option<String> {
        self.text(&ID)
    }
}

impl From<Map<String, Value>> for LegacyRow {
    fn from(columns: Map<String, Value>) -> Self {
        let mut row = Self::new();
        for (column, value) in columns {
            row.insert(column, value);
        }
        row
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(naive) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    {
        return Some(Utc.from_utc_datetime(&naive));
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
