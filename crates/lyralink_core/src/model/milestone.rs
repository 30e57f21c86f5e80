//! Timeline milestone record.

use super::{
    ensure_date, ensure_id, new_record_id, normalize_block, normalize_line, require_text,
    ListRecord, RecordId, RecordValidationError,
};
use crate::list::{ListSchema, MigrationStep};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MILESTONES_SCHEMA: ListSchema = ListSchema {
    name: "milestones",
    key: "lyra_milestones_v2",
    migrations: &[MigrationStep {
        legacy_key: "lyra_milestones",
        upgrade: upgrade_v1,
    }],
};

/// Badge drawn on the timeline node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneIcon {
    #[default]
    Heart,
    Star,
    Camera,
}

/// One dated entry of the shared story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub date: NaiveDate,
    pub title: String,
    pub story: String,
    #[serde(default)]
    pub icon: MilestoneIcon,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// User input for a new milestone. A missing date means "today".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneDraft {
    pub date: Option<NaiveDate>,
    pub title: String,
    pub story: String,
}

impl Milestone {
    pub(crate) fn from_draft(
        draft: &MilestoneDraft,
        id: RecordId,
        created_at: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Self, RecordValidationError> {
        let milestone = Self {
            id,
            date: draft.date.unwrap_or(today),
            title: normalize_line(&draft.title),
            story: normalize_block(&draft.story),
            icon: MilestoneIcon::Heart,
            created_at,
        };
        milestone.validate()?;
        Ok(milestone)
    }
}

impl ListRecord for Milestone {
    const SCHEMA: &'static ListSchema = &MILESTONES_SCHEMA;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("title", &self.title)?;
        require_text("story", &self.story)
    }

    fn seed() -> Vec<Self> {
        let created_at = Utc
            .with_ymd_and_hms(2026, 2, 14, 3, 0, 0)
            .single()
            .unwrap_or_default();
        let entry = |id: &str, (y, m, d): (i32, u32, u32), title: &str, story: &str, icon| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| Milestone {
                id: id.to_string(),
                date,
                title: title.to_string(),
                story: story.to_string(),
                icon,
                created_at,
            })
        };

        [
            entry(
                "1",
                (2025, 12, 23),
                "The Day We Connected",
                "In the MLBB Global Chat, our digital worlds collided. That first message felt like finding a rare signal in the noise - something special was beginning across the distance.",
                MilestoneIcon::Star,
            ),
            entry(
                "2",
                (2025, 12, 25),
                "First Deep Conversation",
                "Christmas Day, but the real gift was our connection. We talked for hours, bridging the physical distance with emotional closeness that felt like we were in the same room.",
                MilestoneIcon::Camera,
            ),
            entry(
                "3",
                (2026, 1, 1),
                "New Year, New Connection",
                "We welcomed the new year together despite the miles between us. Our long-distance bond grew stronger with each shared moment and whispered promise.",
                MilestoneIcon::Heart,
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// v1 records had no `id`, and their `date` could be empty.
fn upgrade_v1(value: Value) -> Option<Value> {
    ensure_id(value).and_then(ensure_date)
}

#[cfg(test)]
mod tests {
    use super::{Milestone, MilestoneDraft, MilestoneIcon};
    use crate::model::ListRecord;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn seed_is_chronological_and_valid() {
        let seed = Milestone::seed();
        assert_eq!(seed.len(), 3);
        assert!(seed.windows(2).all(|pair| pair[0].date <= pair[1].date));
        assert!(seed.iter().all(|m| m.validate().is_ok()));
    }

    #[test]
    fn draft_without_date_uses_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let draft = MilestoneDraft {
            date: None,
            title: "  First   call ".to_string(),
            story: "We talked.".to_string(),
        };
        let milestone = Milestone::from_draft(&draft, "x".to_string(), Utc::now(), today).unwrap();
        assert_eq!(milestone.date, today);
        assert_eq!(milestone.title, "First call");
        assert_eq!(milestone.icon, MilestoneIcon::Heart);
    }

    #[test]
    fn wire_shape_uses_camel_case_and_lowercase_icon() {
        let json = serde_json::to_value(&Milestone::seed()[0]).unwrap();
        assert_eq!(json["date"], "2025-12-23");
        assert_eq!(json["icon"], "star");
        assert!(json.get("createdAt").is_some());
    }
}
