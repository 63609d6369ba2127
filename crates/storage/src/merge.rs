//! Local-wins merge of a remote snapshot into the local collection.
//!
//! The result is every local record, unchanged and in order, followed by
//! each remote record whose identifier is not already present. A local copy
//! of a remote record is never overwritten by a later fetch, and records
//! that disappeared upstream are kept until the user deletes them: the demo
//! API has no way to announce deletions.

use std::collections::HashSet;

use loja_core::{Record, RecordId};
use tracing::debug;

/// Merge `remote` into `local`.
///
/// Remote records are appended in input order. If the snapshot itself
/// repeats an identifier, only its first occurrence is kept, so the result
/// always has unique identifiers when `local` does.
#[must_use]
pub fn merge_local_wins<T: Record + Clone>(local: Vec<T>, remote: &[T]) -> Vec<T> {
    let local_count = local.len();
    let mut seen: HashSet<RecordId> = local.iter().map(|r| r.id().clone()).collect();

    let mut merged = local;
    merged.reserve(remote.len());
    for record in remote {
        if seen.insert(record.id().clone()) {
            merged.push(record.clone());
        }
    }

    debug!(
        local = local_count,
        remote = remote.len(),
        appended = merged.len() - local_count,
        "Merged remote snapshot"
    );

    merged
}
