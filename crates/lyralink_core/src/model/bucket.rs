//! Bucket-list item record.
//!
//! # Invariants
//! - `completed_at` is set iff `completed` is true, for items toggled here.

use super::{
    ensure_id, new_record_id, normalize_line, require_text, ListRecord, RecordId,
    RecordValidationError,
};
use crate::list::{ListSchema, MigrationStep};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BUCKET_SCHEMA: ListSchema = ListSchema {
    name: "bucket",
    key: "lyra_bucket_v3",
    migrations: &[MigrationStep {
        legacy_key: "lyra_bucket_v2",
        upgrade: upgrade_v2,
    }],
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketCategory {
    Travel,
    Tech,
    #[default]
    Life,
    Adventure,
}

impl BucketCategory {
    pub const ALL: [BucketCategory; 4] = [Self::Travel, Self::Tech, Self::Life, Self::Adventure];

    pub fn label(self) -> &'static str {
        match self {
            Self::Travel => "Travel",
            Self::Tech => "Tech",
            Self::Life => "Life",
            Self::Adventure => "Adventure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketItem {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: BucketCategory,
}

impl BucketItem {
    pub(crate) fn new(
        id: RecordId,
        text: &str,
        category: BucketCategory,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RecordValidationError> {
        let item = Self {
            id,
            text: normalize_line(text),
            completed: false,
            created_at,
            completed_at: None,
            category,
        };
        item.validate()?;
        Ok(item)
    }

    /// Flips completion, stamping or clearing `completed_at`.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now);
    }
}

impl ListRecord for BucketItem {
    const SCHEMA: &'static ListSchema = &BUCKET_SCHEMA;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("text", &self.text)
    }

    fn seed() -> Vec<Self> {
        let at = |minute: u32| {
            Utc.with_ymd_and_hms(2026, 2, 14, 3, minute, 0)
                .single()
                .unwrap_or_default()
        };
        let item = |id: &str, text: &str, created_at, category| BucketItem {
            id: id.to_string(),
            text: text.to_string(),
            completed: false,
            created_at,
            completed_at: None,
            category,
        };

        vec![
            item(
                "1",
                "Visit Japan together during cherry blossom season",
                at(0),
                BucketCategory::Travel,
            ),
            item(
                "2",
                "Build our own custom keyboard together",
                at(2),
                BucketCategory::Tech,
            ),
            item(
                "3",
                "Have a 24-hour movie marathon",
                at(5),
                BucketCategory::Life,
            ),
            item(
                "4",
                "Cook a 5-course meal from scratch",
                at(0),
                BucketCategory::Life,
            ),
        ]
    }
}

/// v2 items predate categories; they all become `life`.
fn upgrade_v2(value: Value) -> Option<Value> {
    let mut value = ensure_id(value)?;
    let object = value.as_object_mut()?;
    let has_category = object.get("category").is_some_and(|c| !c.is_null());
    if !has_category {
        object.insert("category".to_string(), Value::String("life".to_string()));
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::{upgrade_v2, BucketCategory, BucketItem};
    use crate::model::ListRecord;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn toggle_stamps_and_clears_completion_time() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let mut item =
            BucketItem::new("a".to_string(), "Stargazing", BucketCategory::Adventure, now).unwrap();

        item.toggle(now);
        assert!(item.completed);
        assert_eq!(item.completed_at, Some(now));

        item.toggle(now);
        assert!(!item.completed);
        assert_eq!(item.completed_at, None);
    }

    #[test]
    fn upgrade_v2_defaults_category_but_keeps_existing() {
        let upgraded = upgrade_v2(json!({"id": "1", "text": "x", "completed": true})).unwrap();
        assert_eq!(upgraded["category"], "life");

        let kept = upgrade_v2(json!({"id": "2", "text": "y", "category": "tech"})).unwrap();
        assert_eq!(kept["category"], "tech");
    }

    #[test]
    fn incomplete_item_omits_completed_at_on_the_wire() {
        let json = serde_json::to_value(&BucketItem::seed()[0]).unwrap();
        assert!(json.get("completedAt").is_none());
        assert_eq!(json["category"], "travel");
    }
}
