//! Story timeline: milestones kept in date order.

use super::log_rejected;
use crate::clock::Clock;
use crate::gate::GatePass;
use crate::kv::KeyValueStore;
use crate::list::{PersistedList, Placement};
use crate::model::milestone::{Milestone, MilestoneDraft};
use crate::model::RecordId;
use std::cmp::Ordering;

pub struct Timeline<S: KeyValueStore, C: Clock> {
    list: PersistedList<Milestone, S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> Timeline<S, C> {
    pub fn open(store: S, clock: C) -> Self {
        Self {
            list: PersistedList::open(store),
            clock,
        }
    }

    /// Milestones, oldest date first.
    pub fn milestones(&self) -> &[Milestone] {
        self.list.records()
    }

    /// Adds a milestone and re-sorts by date. Same-day entries keep insertion order.
    pub fn add(&mut self, draft: &MilestoneDraft) -> Option<RecordId> {
        let id = self.list.fresh_id();
        match Milestone::from_draft(draft, id, self.clock.now(), self.clock.today()) {
            Ok(milestone) => Some(self.list.insert(milestone, Placement::Sorted(by_date))),
            Err(err) => {
                log_rejected("milestones", &err);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str, pass: &GatePass) -> bool {
        self.list.remove(id, pass)
    }
}

fn by_date(a: &Milestone, b: &Milestone) -> Ordering {
    a.date.cmp(&b.date)
}
