//! "Reasons I love you" record.

use super::{
    ensure_id, new_record_id, normalize_line, require_text, ListRecord, RecordId,
    RecordValidationError,
};
use crate::list::{ListSchema, MigrationStep};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const REASONS_SCHEMA: ListSchema = ListSchema {
    name: "reasons",
    key: "lyra_reasons_v3",
    migrations: &[MigrationStep {
        legacy_key: "lyra_reasons_v2",
        upgrade: upgrade_v2,
    }],
};

const SEED_REASONS: &[&str] = &[
    "Your smile makes every pixel of this world brighter.",
    "The way you look at me when you think I'm not looking.",
    "Your laugh is my favorite soundtrack.",
    "How you always know exactly what to say to calm my digital storms.",
    "Your unwavering kindness to every soul you meet.",
    "The way you nerd out about the things you love.",
    "How you make me want to be the best version of myself.",
    "Your beautiful eyes that hold entire universes.",
    "The way you hold my hand like you're never letting go.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub text: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Reason {
    pub(crate) fn new(
        id: RecordId,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RecordValidationError> {
        let reason = Self {
            id,
            text: normalize_line(text),
            created_at,
        };
        reason.validate()?;
        Ok(reason)
    }
}

impl ListRecord for Reason {
    const SCHEMA: &'static ListSchema = &REASONS_SCHEMA;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("text", &self.text)
    }

    fn seed() -> Vec<Self> {
        SEED_REASONS
            .iter()
            .enumerate()
            .map(|(index, text)| Reason {
                id: format!("r{}", index + 1),
                text: (*text).to_string(),
                created_at: DateTime::default(),
            })
            .collect()
    }
}

/// v2 stored bare strings; each becomes a record with a fresh id.
fn upgrade_v2(value: Value) -> Option<Value> {
    match value {
        Value::String(text) => Some(json!({ "id": new_record_id(), "text": text })),
        other => ensure_id(other),
    }
}

#[cfg(test)]
mod tests {
    use super::{upgrade_v2, Reason};
    use crate::model::ListRecord;
    use serde_json::json;

    #[test]
    fn upgrade_wraps_plain_strings() {
        let upgraded = upgrade_v2(json!("Your laugh")).unwrap();
        assert_eq!(upgraded["text"], "Your laugh");
        let reason: Reason = serde_json::from_value(upgraded).unwrap();
        assert!(!reason.id.is_empty());
    }

    #[test]
    fn upgrade_drops_non_text_values() {
        assert!(upgrade_v2(json!(42)).is_none());
    }

    #[test]
    fn seed_has_unique_ids() {
        let seed = Reason::seed();
        let mut ids: Vec<_> = seed.iter().map(|r| r.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), seed.len());
    }
}
