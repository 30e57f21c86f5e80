//! Letters archive, newest first.

use super::log_rejected;
use crate::clock::Clock;
use crate::gate::GatePass;
use crate::kv::KeyValueStore;
use crate::list::{PersistedList, Placement};
use crate::model::letter::{Letter, LetterDraft};
use crate::model::RecordId;

pub struct LetterArchive<S: KeyValueStore, C: Clock> {
    list: PersistedList<Letter, S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> LetterArchive<S, C> {
    pub fn open(store: S, clock: C) -> Self {
        Self {
            list: PersistedList::open(store),
            clock,
        }
    }

    pub fn letters(&self) -> &[Letter] {
        self.list.records()
    }

    pub fn get(&self, id: &str) -> Option<&Letter> {
        self.list.get(id)
    }

    /// Writes a new letter dated today at the top of the archive.
    pub fn add(&mut self, draft: &LetterDraft) -> Option<RecordId> {
        let id = self.list.fresh_id();
        match Letter::from_draft(draft, id, self.clock.now(), self.clock.today()) {
            Ok(letter) => Some(self.list.insert(letter, Placement::Front)),
            Err(err) => {
                log_rejected("letters", &err);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str, pass: &GatePass) -> bool {
        self.list.remove(id, pass)
    }
}
