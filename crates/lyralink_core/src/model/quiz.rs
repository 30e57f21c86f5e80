//! Quiz question record.
//!
//! # Invariants
//! - Exactly [`OPTION_COUNT`] options.
//! - `answer` equals one of `options`.

use super::{
    ensure_id, new_record_id, normalize_block, normalize_line, require_text, ListRecord, RecordId,
    RecordValidationError,
};
use crate::list::{ListSchema, MigrationStep};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const OPTION_COUNT: usize = 4;
/// Stands in for a legacy option that was saved as whitespace only.
pub const BLANK_OPTION: &str = "(blank)";

pub const QUIZ_SCHEMA: ListSchema = ListSchema {
    name: "quiz",
    key: "lyra_quiz_questions_v2",
    migrations: &[MigrationStep {
        legacy_key: "lyra_quiz_questions",
        upgrade: upgrade_v1,
    }],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(default = "new_record_id")]
    pub id: RecordId,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    /// Shown after answering, right or wrong.
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// Form input for a new question; `correct_index` points into `options`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDraft {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub correct_index: usize,
    pub context: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }

    pub(crate) fn from_draft(
        draft: &QuizDraft,
        id: RecordId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RecordValidationError> {
        require_text("context", &draft.context)?;
        let options: Vec<String> = draft.options.iter().map(|o| normalize_line(o)).collect();
        let answer = options
            .get(draft.correct_index)
            .cloned()
            .ok_or(RecordValidationError::CorrectIndexOutOfRange(
                draft.correct_index,
            ))?;

        let question = Self {
            id,
            question: normalize_line(&draft.question),
            options,
            answer,
            context: normalize_block(&draft.context),
            created_at,
        };
        question.validate()?;
        Ok(question)
    }
}

impl ListRecord for QuizQuestion {
    const SCHEMA: &'static ListSchema = &QUIZ_SCHEMA;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("question", &self.question)?;
        if self.options.len() != OPTION_COUNT {
            return Err(RecordValidationError::OptionCount {
                expected: OPTION_COUNT,
                actual: self.options.len(),
            });
        }
        for option in &self.options {
            require_text("options", option)?;
        }
        if !self.options.contains(&self.answer) {
            return Err(RecordValidationError::AnswerNotAnOption(self.answer.clone()));
        }
        Ok(())
    }

    fn seed() -> Vec<Self> {
        let created_at = Utc
            .with_ymd_and_hms(2026, 2, 14, 3, 0, 0)
            .single()
            .unwrap_or_default();
        let question = |id: &str, text: &str, options: [&str; 4], answer: &str, context: &str| {
            QuizQuestion {
                id: id.to_string(),
                question: text.to_string(),
                options: options.iter().map(|o| o.to_string()).collect(),
                answer: answer.to_string(),
                context: context.to_string(),
                created_at,
            }
        };

        vec![
            question(
                "q1",
                "Where did Yuki and Lyraa first exchange signals (met)?",
                ["Instagram", "A cozy cafe", "Game", "University Library"],
                "Game",
                "It started with a single ping in MLBB Global Chat that changed everything.",
            ),
            question(
                "q2",
                "What is Yuki's absolute favorite thing about Lyraa?",
                ["Her laugh", "Her mind", "The way she cares", "All of the above"],
                "All of the above",
                "There's no single part of you I don't adore.",
            ),
            question(
                "q3",
                "What's the 'Protocol' for when Lyraa feels stressed?",
                ["Ice cream", "Long hugs & lofi music", "Coding together", "Quiet time"],
                "Long hugs & lofi music",
                "My primary function is to be your safe harbor.",
            ),
            question(
                "q4",
                "Which neon color does Yuki associate with Lyraa's energy?",
                ["Neon Pink", "Cyber Cyan", "Deep Purple", "Electric White"],
                "Neon Pink",
                "It represents the passion and warmth you bring to my system.",
            ),
            question(
                "q5",
                "What is the secret access code to Yuki's heart?",
                ["Lyraa", "Coffee", "Gaming", "Algorithms"],
                "Lyraa",
                "Access granted. You are the only admin with root privileges.",
            ),
        ]
    }
}

/// v1 records had no `id` and could hold whitespace-only options.
fn upgrade_v1(value: Value) -> Option<Value> {
    let mut value = ensure_id(value)?;
    let object = value.as_object_mut()?;
    let is_blank = |text: &str| !text.is_empty() && text.trim().is_empty();

    let answer_blank = object
        .get("answer")
        .and_then(Value::as_str)
        .is_some_and(is_blank);
    if let Some(Value::Array(options)) = object.get_mut("options") {
        for option in options.iter_mut() {
            if option.as_str().is_some_and(is_blank) {
                *option = Value::String(BLANK_OPTION.to_string());
            }
        }
    }
    if answer_blank {
        object.insert("answer".to_string(), Value::String(BLANK_OPTION.to_string()));
    }
    Some(value)
}
