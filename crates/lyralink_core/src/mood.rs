//! Mood selector palette.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    #[default]
    Happy,
    Sad,
    Stressed,
    MissingYou,
}

/// Presentation for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodConfig {
    pub color: &'static str,
    pub music: &'static str,
    pub message: &'static str,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Stressed, Mood::MissingYou];

    pub fn config(self) -> MoodConfig {
        match self {
            Mood::Happy => MoodConfig {
                color: "#FF0080",
                music: "upbeat",
                message: "Your happiness is my primary directive!",
            },
            Mood::Sad => MoodConfig {
                color: "#00F0FF",
                music: "soft",
                message: "I'm here to hold you until the static clears.",
            },
            Mood::Stressed => MoodConfig {
                color: "#B026FF",
                music: "ambient",
                message: "Take a deep breath. We'll solve this together.",
            },
            Mood::MissingYou => MoodConfig {
                color: "#ffffff",
                music: "romantic",
                message: "Every second without you feels like a system delay.",
            },
        }
    }

    /// Button tooltip, e.g. `MISSING YOU`.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "HAPPY",
            Mood::Sad => "SAD",
            Mood::Stressed => "STRESSED",
            Mood::MissingYou => "MISSING YOU",
        }
    }
}
