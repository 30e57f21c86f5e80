//! Persisted list records.
//!
//! # Responsibility
//! - Define the five record shapes stored as JSON arrays.
//! - Own per-record validation, seed data and legacy upgrades.
//!
//! # Invariants
//! - `id` is unique within its list and never reused.
//! - Required text fields are non-blank after normalization.
//! - Wire names are camelCase (`createdAt`, `completedAt`).

use crate::list::ListSchema;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod bucket;
pub mod letter;
pub mod milestone;
pub mod quiz;
pub mod reason;

/// Stable identifier of a record within its list.
pub type RecordId = String;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Record-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    BlankField(&'static str),
    OptionCount { expected: usize, actual: usize },
    AnswerNotAnOption(String),
    CorrectIndexOutOfRange(usize),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "required field `{field}` is blank"),
            Self::OptionCount { expected, actual } => {
                write!(f, "expected {expected} options, got {actual}")
            }
            Self::AnswerNotAnOption(answer) => {
                write!(f, "answer `{answer}` is not one of the options")
            }
            Self::CorrectIndexOutOfRange(index) => {
                write!(f, "correct option index {index} is out of range")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// A record type that lives in one persisted list.
pub trait ListRecord: Clone + Serialize + DeserializeOwned {
    /// Storage key and migration chain of the list holding this record type.
    const SCHEMA: &'static ListSchema;

    fn id(&self) -> &str;

    /// Checks invariants that serde cannot express.
    fn validate(&self) -> Result<(), RecordValidationError>;

    /// Records shown when nothing has been stored yet.
    fn seed() -> Vec<Self>;
}

/// Generates a fresh random record id.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::new_v4().to_string()
}

/// Trims a single-line field and collapses inner whitespace runs.
pub fn normalize_line(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

/// Trims a multi-line body, keeping its inner line structure.
pub fn normalize_block(value: &str) -> String {
    value.trim().to_string()
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField(field));
    }
    Ok(())
}

/// Adds `id` when a legacy object lacks one.
pub(crate) fn ensure_id(mut value: serde_json::Value) -> Option<serde_json::Value> {
    let object = value.as_object_mut()?;
    let has_id = object
        .get("id")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|id| !id.trim().is_empty());
    if !has_id {
        object.insert("id".to_string(), serde_json::Value::String(new_record_id()));
    }
    Some(value)
}

/// Rewrites a legacy `date` into `YYYY-MM-DD`, filling it when missing.
///
/// An empty or unparseable date falls back to the `createdAt` day, then to
/// the day of a millisecond-timestamp id, then to 1970-01-01.
pub(crate) fn ensure_date(mut value: serde_json::Value) -> Option<serde_json::Value> {
    let object = value.as_object_mut()?;
    let date = object
        .get("date")
        .and_then(serde_json::Value::as_str)
        .and_then(|raw| raw.trim().parse::<NaiveDate>().ok())
        .unwrap_or_else(|| fallback_date(object));
    object.insert(
        "date".to_string(),
        serde_json::Value::String(date.format("%Y-%m-%d").to_string()),
    );
    Some(value)
}

fn fallback_date(object: &serde_json::Map<String, serde_json::Value>) -> NaiveDate {
    let text = |field: &str| object.get(field).and_then(serde_json::Value::as_str);
    text("createdAt")
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|at| at.with_timezone(&Utc).date_naive())
        .or_else(|| {
            text("id")
                .and_then(|id| id.trim().parse::<i64>().ok())
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|at| at.date_naive())
        })
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.date_naive())
}

#[cfg(test)]
mod tests {
    use super::{ensure_date, ensure_id, normalize_block, normalize_line};
    use serde_json::json;

    #[test]
    fn normalize_line_collapses_whitespace() {
        assert_eq!(normalize_line("  Visit \t the\n moon  "), "Visit the moon");
    }

    #[test]
    fn normalize_block_keeps_line_breaks() {
        assert_eq!(normalize_block("\n Dear,\n\nhello \n"), "Dear,\n\nhello");
    }

    #[test]
    fn ensure_id_keeps_existing_and_fills_missing() {
        let kept = ensure_id(json!({"id": "7", "text": "a"})).unwrap();
        assert_eq!(kept["id"], "7");

        let filled = ensure_id(json!({"text": "b"})).unwrap();
        assert!(!filled["id"].as_str().unwrap().is_empty());

        assert!(ensure_id(json!("plain")).is_none());
    }

    #[test]
    fn ensure_date_repairs_blank_and_unparseable_dates() {
        let kept = ensure_date(json!({"id": "1", "date": " 2025-12-23 "})).unwrap();
        assert_eq!(kept["date"], "2025-12-23");

        let from_created = ensure_date(json!({
            "id": "x",
            "date": "",
            "createdAt": "2026-02-14T03:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(from_created["date"], "2026-02-14");

        let from_id = ensure_date(json!({"id": "1700000000000", "date": "soon"})).unwrap();
        assert_eq!(from_id["date"], "2023-11-14");

        let epoch = ensure_date(json!({"id": "abc"})).unwrap();
        assert_eq!(epoch["date"], "1970-01-01");
    }
}
