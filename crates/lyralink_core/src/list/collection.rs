//! In-memory list mirrored to storage after every mutation.

use super::ListStore;
use crate::gate::GatePass;
use crate::kv::KeyValueStore;
use crate::model::{new_record_id, ListRecord, RecordId};
use std::cmp::Ordering;

/// Where a new record lands.
pub enum Placement<R> {
    Front,
    Back,
    /// Appended, then the whole list is stable-sorted with the comparator.
    Sorted(fn(&R, &R) -> Ordering),
}

/// A loaded list plus the store it saves back to.
///
/// Every mutation re-serializes the full list under the schema key.
#[derive(Debug)]
pub struct PersistedList<R: ListRecord, S: KeyValueStore> {
    store: ListStore<S>,
    records: Vec<R>,
}

impl<R: ListRecord, S: KeyValueStore> PersistedList<R, S> {
    /// Loads the list for `R`, falling back to `R::seed()`.
    pub fn open(store: S) -> Self {
        let store = ListStore::new(store);
        let records = store.load(R::SCHEMA, R::seed);
        Self { store, records }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Returns an id not used by any record in this list.
    pub fn fresh_id(&self) -> RecordId {
        loop {
            let id = new_record_id();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Inserts `record` and persists; returns its id.
    pub fn insert(&mut self, record: R, placement: Placement<R>) -> RecordId {
        let id = record.id().to_string();
        match placement {
            Placement::Front => self.records.insert(0, record),
            Placement::Back => self.records.push(record),
            Placement::Sorted(compare) => {
                self.records.push(record);
                self.records.sort_by(compare);
            }
        }
        self.persist();
        id
    }

    /// Applies `change` to the record with `id` and persists.
    ///
    /// Returns `false` and writes nothing when `id` is unknown.
    pub fn update(&mut self, id: &str, change: impl FnOnce(&mut R)) -> bool {
        let Some(record) = self.records.iter_mut().find(|record| record.id() == id) else {
            return false;
        };
        change(record);
        self.persist();
        true
    }

    /// Removes the record with `id`, keeping the order of the rest.
    ///
    /// Returns `false` and writes nothing when `id` is unknown.
    pub fn remove(&mut self, id: &str, _pass: &GatePass) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        if self.records.len() == before {
            return false;
        }
        self.persist();
        log::info!(
            "event=list_remove module=list status=ok list={} remaining={}",
            R::SCHEMA.name,
            self.records.len()
        );
        true
    }

    fn persist(&self) {
        self.store.save(R::SCHEMA.key, &self.records);
    }
}
