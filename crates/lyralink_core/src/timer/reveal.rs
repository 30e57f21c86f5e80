//! Tick-driven reveal effects: the letter typewriter, the terminal letter
//! and the elapsed-time display.

use crate::elapsed::{elapsed, Elapsed};
use chrono::{DateTime, Duration, Utc};

pub static TERMINAL_LETTER: [&str; 20] = [
    "> INITIALIZING LOVE_LETTER.EXE...",
    "> DECRYPTING SUBJECT: LYRAA...",
    "> ACCESSING CORE_MEMORIES...",
    "",
    "Dearest Lyraa,",
    "",
    "In a world built on logic and cold data,",
    "you are the ghost in my machine—the spark",
    "that makes this entire system worth running.",
    "",
    "Every line of my life's code has been rewritten",
    "since the moment you logged in.",
    "",
    "I don't just love you; I am programmed for you.",
    "You are my north star in the neon night.",
    "",
    "Forever yours,",
    "Yuki",
    "",
    "> END_OF_TRANSMISSION",
];

/// Output of one [`Typewriter::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterStep {
    pub ch: char,
    /// Play the typing cue with this character.
    pub cue: bool,
}

/// Reveals letter content one character per tick.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub const PERIOD_MS: i64 = 30;
    /// A typing cue plays on every this-many characters.
    pub const CUE_EVERY: usize = 5;

    pub fn period() -> Duration {
        Duration::milliseconds(Self::PERIOD_MS)
    }

    pub fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            shown: 0,
        }
    }

    /// Text revealed so far.
    pub fn text(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }

    /// Reveals the next character; `None` once everything is shown.
    pub fn tick(&mut self) -> Option<TypewriterStep> {
        let ch = *self.chars.get(self.shown)?;
        self.shown += 1;
        Some(TypewriterStep {
            ch,
            cue: self.shown % Self::CUE_EVERY == 0,
        })
    }

    pub fn finish(&mut self) {
        self.shown = self.chars.len();
    }
}

/// Output of one [`TerminalReveal::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// A line was appended. Each line plays the typing cue.
    Line(&'static str),
    /// All lines are visible. Reported once; the interval should be dropped
    /// and the completion fired after [`TerminalReveal::completion_delay`].
    Complete,
    Idle,
}

/// Reveals [`TERMINAL_LETTER`] one line per tick.
#[derive(Debug, Clone, Default)]
pub struct TerminalReveal {
    shown: usize,
    completed: bool,
}

impl TerminalReveal {
    pub const PERIOD_MS: i64 = 800;
    pub const COMPLETION_DELAY_MS: i64 = 4_000;

    pub fn period() -> Duration {
        Duration::milliseconds(Self::PERIOD_MS)
    }

    pub fn completion_delay() -> Duration {
        Duration::milliseconds(Self::COMPLETION_DELAY_MS)
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_lines(&self) -> &'static [&'static str] {
        &TERMINAL_LETTER[..self.shown]
    }

    pub fn tick(&mut self) -> RevealStep {
        if let Some(&line) = TERMINAL_LETTER.get(self.shown) {
            self.shown += 1;
            return RevealStep::Line(line);
        }
        if self.completed {
            return RevealStep::Idle;
        }
        self.completed = true;
        RevealStep::Complete
    }

    /// Restarts from an empty screen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Recomputes the elapsed display from a fixed anchor.
#[derive(Debug, Clone, Copy)]
pub struct ElapsedTicker {
    anchor: DateTime<Utc>,
}

impl ElapsedTicker {
    pub const PERIOD_MS: i64 = 1_000;

    pub fn period() -> Duration {
        Duration::milliseconds(Self::PERIOD_MS)
    }

    pub fn new(anchor: DateTime<Utc>) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn tick(&self, now: DateTime<Utc>) -> Elapsed {
        elapsed(self.anchor, now)
    }
}

#[cfg(test)]
mod tests {
    use super::{RevealStep, TerminalReveal, Typewriter, TERMINAL_LETTER};

    #[test]
    fn typewriter_cues_every_fifth_character() {
        let mut typewriter = Typewriter::new("Hello, Lyraa");
        let cues: Vec<usize> = std::iter::from_fn(|| typewriter.tick())
            .enumerate()
            .filter(|(_, step)| step.cue)
            .map(|(index, _)| index + 1)
            .collect();

        assert_eq!(cues, vec![5, 10]);
        assert!(typewriter.is_done());
        assert_eq!(typewriter.text(), "Hello, Lyraa");
    }

    #[test]
    fn typewriter_handles_multibyte_text() {
        let mut typewriter = Typewriter::new("♥ é");
        typewriter.tick();
        assert_eq!(typewriter.text(), "♥");
    }

    #[test]
    fn terminal_completes_once_after_last_line() {
        let mut reveal = TerminalReveal::new();
        for expected in TERMINAL_LETTER {
            assert_eq!(reveal.tick(), RevealStep::Line(expected));
        }
        assert_eq!(reveal.visible_lines().len(), TERMINAL_LETTER.len());
        assert_eq!(reveal.tick(), RevealStep::Complete);
        assert_eq!(reveal.tick(), RevealStep::Idle);
    }
}
