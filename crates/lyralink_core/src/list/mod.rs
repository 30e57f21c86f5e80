//! Whole-list JSON persistence with versioned keys.
//!
//! # Responsibility
//! - Load a list from its current key, upgrading from legacy keys if needed.
//! - Coerce parsed JSON into records, dropping what cannot be repaired.
//! - Save by re-serializing the entire list under its current key.
//!
//! # Invariants
//! - `load` never fails: absent or malformed data yields the seed.
//! - Migration writes the upgraded list under the current key and leaves
//!   every legacy key untouched.
//! - Loaded ids are unique; the first occurrence wins.

use crate::kv::{read_or_none, write_logged, KeyValueStore};
use crate::model::ListRecord;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Instant;

mod collection;

pub use collection::{PersistedList, Placement};

/// One legacy storage version and the upgrade to the next version.
#[derive(Debug, Clone, Copy)]
pub struct MigrationStep {
    /// Key the legacy version was stored under.
    pub legacy_key: &'static str,
    /// Upgrades one stored element; `None` drops it.
    pub upgrade: fn(Value) -> Option<Value>,
}

/// Storage layout of one list type.
#[derive(Debug, Clone, Copy)]
pub struct ListSchema {
    pub name: &'static str,
    /// Key of the current version.
    pub key: &'static str,
    /// Legacy versions, oldest first.
    pub migrations: &'static [MigrationStep],
}

/// Loads and saves record lists over a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ListStore<S> {
    store: S,
}

impl<S: KeyValueStore> ListStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored list, or `seed()` when nothing usable is stored.
    pub fn load<R: ListRecord>(&self, schema: &ListSchema, seed: impl FnOnce() -> Vec<R>) -> Vec<R> {
        let started_at = Instant::now();

        if let Some(raw) = read_or_none(&self.store, schema.key) {
            return match decode_array(&raw) {
                Some(values) => {
                    let records = coerce_records::<R>(schema, values);
                    info!(
                        "event=list_load module=list status=ok list={} source=current count={} duration_ms={}",
                        schema.name,
                        records.len(),
                        started_at.elapsed().as_millis()
                    );
                    records
                }
                None => {
                    warn!(
                        "event=list_load module=list status=fallback list={} reason=malformed key={}",
                        schema.name, schema.key
                    );
                    seed()
                }
            };
        }

        if let Some(records) = self.migrate::<R>(schema) {
            return records;
        }

        debug!(
            "event=list_load module=list status=ok list={} source=seed",
            schema.name
        );
        seed()
    }

    /// Overwrites the blob under `key` with the full list.
    ///
    /// Returns `false` when the write failed; the failure is logged.
    pub fn save<R: Serialize>(&self, key: &str, records: &[R]) -> bool {
        match serde_json::to_string(records) {
            Ok(json) => write_logged(&self.store, key, &json),
            Err(err) => {
                warn!(
                    "event=list_save module=list status=error key={} error={}",
                    key, err
                );
                false
            }
        }
    }

    fn migrate<R: ListRecord>(&self, schema: &ListSchema) -> Option<Vec<R>> {
        let (start, raw) = schema
            .migrations
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, step)| {
                read_or_none(&self.store, step.legacy_key).map(|raw| (index, raw))
            })?;
        let from_key = schema.migrations[start].legacy_key;

        let Some(values) = decode_array(&raw) else {
            warn!(
                "event=list_migrate module=list status=fallback list={} from={} reason=malformed",
                schema.name, from_key
            );
            return None;
        };

        let steps = &schema.migrations[start..];
        let upgraded: Vec<Value> = values
            .into_iter()
            .filter_map(|value| {
                steps
                    .iter()
                    .try_fold(value, |value, step| (step.upgrade)(value))
            })
            .collect();

        let records = coerce_records::<R>(schema, upgraded);
        self.save(schema.key, &records);
        info!(
            "event=list_migrate module=list status=ok list={} from={} to={} count={}",
            schema.name,
            from_key,
            schema.key,
            records.len()
        );
        Some(records)
    }
}

fn decode_array(raw: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => Some(values),
        _ => None,
    }
}

fn coerce_records<R: ListRecord>(schema: &ListSchema, values: Vec<Value>) -> Vec<R> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        if !value.is_object() {
            warn!(
                "event=list_coerce module=list status=dropped list={} index={} reason=not_object",
                schema.name, index
            );
            continue;
        }

        let record: R = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    "event=list_coerce module=list status=dropped list={} index={} reason=shape error={}",
                    schema.name, index, err
                );
                continue;
            }
        };

        if let Err(err) = record.validate() {
            warn!(
                "event=list_coerce module=list status=dropped list={} index={} reason=invalid error={}",
                schema.name, index, err
            );
            continue;
        }

        if !seen.insert(record.id().to_string()) {
            warn!(
                "event=list_coerce module=list status=dropped list={} index={} reason=duplicate_id",
                schema.name, index
            );
            continue;
        }

        records.push(record);
    }

    records
}
