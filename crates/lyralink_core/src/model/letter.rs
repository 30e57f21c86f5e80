//! Archived letter record.

use super::{
    ensure_date, ensure_id, new_record_id, normalize_block, normalize_line, require_text,
    ListRecord, RecordId, RecordValidationError,
};
use crate::list::{ListSchema, MigrationStep};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const LETTERS_SCHEMA: ListSchema = ListSchema {
    name: "letters",
    key: "lyra_letters_v2",
    migrations: &[MigrationStep {
        legacy_key: "lyra_letters",
        upgrade: upgrade_v1,
    }],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub title: String,
    /// Day the letter was written.
    pub date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterDraft {
    pub title: String,
    pub content: String,
}

impl Letter {
    pub(crate) fn from_draft(
        draft: &LetterDraft,
        id: RecordId,
        created_at: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Self, RecordValidationError> {
        let letter = Self {
            id,
            title: normalize_line(&draft.title),
            date: today,
            content: normalize_block(&draft.content),
            sealed: false,
            created_at,
        };
        letter.validate()?;
        Ok(letter)
    }
}

impl ListRecord for Letter {
    const SCHEMA: &'static ListSchema = &LETTERS_SCHEMA;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)
    }

    fn seed() -> Vec<Self> {
        let created_at = Utc
            .with_ymd_and_hms(2026, 2, 14, 3, 0, 0)
            .single()
            .unwrap_or_default();
        let letter = |id: &str, (y, m, d): (i32, u32, u32), title: &str, content: &str| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| Letter {
                id: id.to_string(),
                title: title.to_string(),
                date,
                content: content.to_string(),
                sealed: false,
                created_at,
            })
        };

        [
            letter(
                "1",
                (2025, 12, 25),
                "Why I Love You",
                "Dearest Lyraa,\n\nI love you because of the way your mind works, finding beauty in the smallest things. I love you because you make me feel like a hero even when I'm just being myself. Most of all, I love you because you are my home in this vast, chaotic digital universe.",
            ),
            letter(
                "2",
                (2026, 1, 1),
                "My Favorite Memories",
                "Lyraa,\n\nThinking back to our first conversations in MLBB Global Chat. The way we connected across the distance... that connection is my favorite feeling. Every moment we share is a line of code in the masterpiece of our long-distance love story.",
            ),
            letter(
                "3",
                (2026, 2, 14),
                "Our Future",
                "Happy Valentine's Day, my love.\n\nI see us bridging the distance, still holding each other close despite the miles. I promise to be your shield, your comfort, and your constant through every challenge our long-distance journey brings.",
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// v1 records had no `id`.
fn upgrade_v1(value: Value) -> Option<Value> {
    ensure_id(value).and_then(ensure_date)
}

#[cfg(test)]
mod tests {
    use super::{Letter, LetterDraft};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn draft_requires_title_and_content() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let draft = LetterDraft {
            title: "Hi".to_string(),
            content: "   ".to_string(),
        };
        assert!(Letter::from_draft(&draft, "a".to_string(), Utc::now(), today).is_err());
    }

    #[test]
    fn legacy_letter_without_created_at_decodes() {
        let letter: Letter = serde_json::from_str(
            r#"{"id":"9","title":"t","date":"2026-01-01","content":"c","sealed":true}"#,
        )
        .unwrap();
        assert!(letter.sealed);
        assert_eq!(letter.created_at.timestamp(), 0);
    }
}
