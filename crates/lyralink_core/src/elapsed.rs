//! Time-together counters.
//!
//! # Invariants
//! - Results are recomputed from absolute instants, never accumulated, so a
//!   late or skipped tick cannot drift the display.
//! - A future anchor reads as zero, never negative.

use crate::clock::Clock;
use crate::kv::{read_or_none, write_logged, KeyValueStore};
use chrono::{DateTime, Days, SecondsFormat, TimeZone, Utc};

pub const ANCHOR_KEY: &str = "lyra_anchor_date";
/// How far back a first-run anchor is placed.
pub const ANCHOR_DAYS_BACK: u64 = 53;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Elapsed {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Splits `max(0, now - anchor)` into days, hours, minutes and seconds.
pub fn elapsed(anchor: DateTime<Utc>, now: DateTime<Utc>) -> Elapsed {
    let diff = (now - anchor).num_milliseconds().max(0);

    let days = diff / MS_PER_DAY;
    let rem = diff % MS_PER_DAY;
    let hours = rem / MS_PER_HOUR;
    let rem = rem % MS_PER_HOUR;
    let minutes = rem / MS_PER_MINUTE;
    let rem = rem % MS_PER_MINUTE;
    let seconds = rem / MS_PER_SECOND;

    Elapsed {
        days,
        hours,
        minutes,
        seconds,
    }
}

/// Returns the stored anchor, creating it on first run.
///
/// A missing or unparseable value is replaced by local midnight
/// [`ANCHOR_DAYS_BACK`] days before today, which is then persisted.
pub fn load_or_init_anchor(store: &impl KeyValueStore, clock: &impl Clock) -> DateTime<Utc> {
    if let Some(raw) = read_or_none(store, ANCHOR_KEY) {
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(anchor) => return anchor.with_timezone(&Utc),
            Err(err) => log::warn!(
                "event=anchor_load module=elapsed status=fallback reason=malformed error={}",
                err
            ),
        }
    }

    let today = clock.today();
    let anchor_day = today
        .checked_sub_days(Days::new(ANCHOR_DAYS_BACK))
        .unwrap_or(today);
    let anchor = clock.local_midnight(anchor_day);
    write_logged(store, ANCHOR_KEY, &format_iso(anchor));
    log::info!(
        "event=anchor_init module=elapsed status=ok anchor={}",
        format_iso(anchor)
    );
    anchor
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Day the "days of love" counter starts from (UTC midnight).
pub fn love_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 8, 14, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Whole days between `start` and `now`, in either direction.
pub fn love_days(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_milliseconds().abs() / MS_PER_DAY
}
