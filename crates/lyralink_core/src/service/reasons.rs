//! Reasons list, newest first.

use super::log_rejected;
use crate::clock::Clock;
use crate::gate::GatePass;
use crate::kv::KeyValueStore;
use crate::list::{PersistedList, Placement};
use crate::model::reason::Reason;
use crate::model::RecordId;

pub struct ReasonList<S: KeyValueStore, C: Clock> {
    list: PersistedList<Reason, S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> ReasonList<S, C> {
    pub fn open(store: S, clock: C) -> Self {
        Self {
            list: PersistedList::open(store),
            clock,
        }
    }

    pub fn reasons(&self) -> &[Reason] {
        self.list.records()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn add(&mut self, text: &str) -> Option<RecordId> {
        let id = self.list.fresh_id();
        match Reason::new(id, text, self.clock.now()) {
            Ok(reason) => Some(self.list.insert(reason, Placement::Front)),
            Err(err) => {
                log_rejected("reasons", &err);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str, pass: &GatePass) -> bool {
        self.list.remove(id, pass)
    }
}
