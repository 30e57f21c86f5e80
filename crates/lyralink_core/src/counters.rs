//! Visit log and daily logo-click counter.
//!
//! # Invariants
//! - A session records at most one visit.
//! - The click count belongs to one calendar date; a stale date reads as 0.

use crate::clock::Clock;
use crate::kv::{read_or_none, write_logged, KeyValueStore};
use chrono::NaiveDate;

pub const VISITS_KEY: &str = "lyra_visits";
pub const DAILY_CLICKS_KEY: &str = "lyra_daily_clicks";
pub const DAILY_CLICKS_DATE_KEY: &str = "lyra_daily_clicks_date";

/// Every this many clicks opens the secret archive.
pub const SECRET_CLICK_INTERVAL: u32 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Message shown when the visit count hits a milestone.
pub fn visit_milestone_message(count: u64) -> Option<&'static str> {
    match count {
        1 => Some("Welcome, my love! This world is built entirely for you. ❤️"),
        10 => Some("Double digits! You've visited our world 10 times! 💕"),
        50 => Some("50 visits?! You truly are my most frequent user. I love you! ✨"),
        _ => None,
    }
}

/// Persisted visit counter, incremented once per session.
pub struct VisitLog<S: KeyValueStore> {
    store: S,
    logged: bool,
}

/// Outcome of [`VisitLog::record_visit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub count: u64,
    pub milestone: Option<&'static str>,
}

impl<S: KeyValueStore> VisitLog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            logged: false,
        }
    }

    /// Stored visit count; unreadable values count as 0.
    pub fn count(&self) -> u64 {
        read_or_none(&self.store, VISITS_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Counts this session's visit. Later calls in the same session return `None`.
    pub fn record_visit(&mut self) -> Option<Visit> {
        if self.logged {
            return None;
        }
        self.logged = true;

        let count = self.count().saturating_add(1);
        write_logged(&self.store, VISITS_KEY, &count.to_string());
        log::info!("event=visit module=counters status=ok count={count}");
        Some(Visit {
            count,
            milestone: visit_milestone_message(count),
        })
    }
}

/// Outcome of one logo click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    pub count_today: u32,
    pub unlocks_secret: bool,
}

/// Today's logo-click counter.
pub struct DailyClicks<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> DailyClicks<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Clicks recorded for today.
    pub fn count_today(&self) -> u32 {
        let today = format_date(self.clock.today());
        let stored_date = read_or_none(&self.store, DAILY_CLICKS_DATE_KEY);
        if stored_date.as_deref() != Some(today.as_str()) {
            return 0;
        }
        read_or_none(&self.store, DAILY_CLICKS_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn click(&mut self) -> Click {
        let count_today = self.count_today().saturating_add(1);
        write_logged(&self.store, DAILY_CLICKS_KEY, &count_today.to_string());
        write_logged(
            &self.store,
            DAILY_CLICKS_DATE_KEY,
            &format_date(self.clock.today()),
        );

        let unlocks_secret = count_today % SECRET_CLICK_INTERVAL == 0;
        if unlocks_secret {
            log::info!("event=secret_unlock module=counters status=ok clicks={count_today}");
        }
        Click {
            count_today,
            unlocks_secret,
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
