//! Per-list use-case services.
//!
//! # Responsibility
//! - Turn form drafts into validated records with fresh ids and timestamps.
//! - Apply each list's display order when inserting.
//! - Keep UI callers away from storage keys and JSON.
//!
//! # Invariants
//! - A draft that fails validation leaves the list and storage untouched.
//! - Every delete goes through a [`crate::gate::GatePass`].

pub mod bucket;
pub mod letters;
pub mod quiz;
pub mod reasons;
pub mod timeline;

use crate::model::RecordValidationError;

fn log_rejected(list: &str, err: &RecordValidationError) {
    log::debug!(
        "event=list_add module=service status=rejected list={} reason={}",
        list,
        err
    );
}
