//! Deterministic "signal of the day" selection.
//!
//! The index is the calendar day-of-year modulo the list length, so the same
//! date always picks the same entry and nothing has to be stored.

use crate::clock::Clock;
use chrono::{Datelike, NaiveDate};

pub const DAILY_NOTES: [&str; 10] = [
    "You are the most beautiful line of code in the universe.",
    "Thinking of your smile is my favorite way to start the day.",
    "I am so incredibly proud of everything you are becoming.",
    "No matter how much the world glitches, you are my constant.",
    "You make every ordinary moment feel like a high-definition miracle.",
    "My heart is permanently synced to your frequency.",
    "Thank you for choosing me, Lyraa. Every single day.",
    "You are my home, my adventure, and my everything.",
    "I love you more than words can express, and more than data can hold.",
    "You deserve all the happiness this world has to offer, and I'll give it to you.",
];

/// Whole days between "January 0" and `date`: 1 on Jan 1, 365/366 on Dec 31.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Picks the entry for `date`. `None` only for an empty list.
pub fn select_daily<T>(content: &[T], date: NaiveDate) -> Option<&T> {
    if content.is_empty() {
        return None;
    }
    content.get(day_of_year(date) as usize % content.len())
}

/// Today's note from [`DAILY_NOTES`] on the clock's local calendar.
pub fn daily_note(clock: &impl Clock) -> &'static str {
    let index = day_of_year(clock.today()) as usize % DAILY_NOTES.len();
    DAILY_NOTES[index]
}

/// Header line above the note, e.g. `October 18, 2026`.
pub fn format_note_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::{day_of_year, format_note_date, select_daily};
    use chrono::NaiveDate;

    #[test]
    fn day_of_year_matches_calendar_ordinal() {
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()), 1);
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), 366);
    }

    #[test]
    fn empty_list_has_no_selection() {
        let empty: [&str; 0] = [];
        assert!(select_daily(&empty, NaiveDate::from_ymd_opt(2026, 5, 5).unwrap()).is_none());
    }

    #[test]
    fn formats_long_us_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        assert_eq!(format_note_date(date), "October 8, 2026");
    }
}
