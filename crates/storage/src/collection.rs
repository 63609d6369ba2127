//! Pure collection operations.
//!
//! Each operation takes a collection by value and returns the new one, so
//! repositories can apply them and persist the result, and tests can
//! exercise them without any storage.

use loja_core::{Record, RecordId};

/// A user-initiated change to a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionOp<T> {
    /// Put a new record at the front.
    Create(T),
    /// Replace the record with the same identifier, in place.
    Update(T),
    /// Remove every record with this identifier.
    Delete(RecordId),
    /// Remove everything.
    Clear,
}

/// Apply `op` to `records`.
///
/// Misses are no-ops: updating or deleting an unknown identifier returns the
/// collection unchanged.
#[must_use]
pub fn apply<T: Record>(mut records: Vec<T>, op: CollectionOp<T>) -> Vec<T> {
    match op {
        CollectionOp::Create(record) => {
            records.insert(0, record);
        }
        CollectionOp::Update(record) => {
            if let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) {
                *slot = record;
            }
        }
        CollectionOp::Delete(id) => {
            records.retain(|r| *r.id() != id);
        }
        CollectionOp::Clear => records.clear(),
    }
    records
}

/// Position of the record with `id`, if any.
#[must_use]
pub fn position<T: Record>(records: &[T], id: &RecordId) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}

/// Whether every identifier in `records` is distinct.
#[must_use]
pub fn has_unique_ids<T: Record>(records: &[T]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(records.len());
    records.iter().all(|r| seen.insert(r.id()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Minimal record for collection tests.
    #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct Named {
        pub id: RecordId,
        pub name: String,
    }

    impl Record for Named {
        fn id(&self) -> &RecordId {
            &self.id
        }
    }

    /// Digits make a remote id, anything else a local one.
    pub fn named(id: &str, name: &str) -> Named {
        Named {
            id: id.parse().unwrap(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_create_prepends() {
        let records = apply(vec![named("1", "Bob")], CollectionOp::Create(named("local-1", "Ana")));
        assert_eq!(records, vec![named("local-1", "Ana"), named("1", "Bob")]);
    }

    #[test]
    fn test_update_preserves_position() {
        let records = vec![named("1", "a"), named("2", "b"), named("3", "c")];
        let records = apply(records, CollectionOp::Update(named("2", "B")));
        assert_eq!(records, vec![named("1", "a"), named("2", "B"), named("3", "c")]);
    }

    #[test]
    fn test_update_miss_is_noop() {
        let records = vec![named("1", "a")];
        let updated = apply(records.clone(), CollectionOp::Update(named("9", "z")));
        assert_eq!(updated, records);
    }

    #[test]
    fn test_delete_removes_all_matches() {
        let records = vec![named("1", "a"), named("2", "b"), named("1", "dup")];
        let records = apply(records, CollectionOp::Delete(RecordId::Remote(1)));
        assert_eq!(records, vec![named("2", "b")]);
    }

    #[test]
    fn test_delete_then_update_is_noop() {
        let records = vec![named("1", "a"), named("2", "b")];
        let deleted = apply(records, CollectionOp::Delete(RecordId::Remote(2)));
        let updated = apply(deleted.clone(), CollectionOp::Update(named("2", "again")));
        assert_eq!(updated, deleted);
    }

    #[test]
    fn test_clear() {
        let records = apply(vec![named("1", "a")], CollectionOp::Clear);
        assert!(records.is_empty());
    }

    #[test]
    fn test_position_and_uniqueness() {
        let records = vec![named("1", "a"), named("local-1", "b")];
        assert_eq!(position(&records, &RecordId::from("local-1")), Some(1));
        assert_eq!(position(&records, &RecordId::Remote(7)), None);
        assert!(has_unique_ids(&records));
        assert!(!has_unique_ids(&[named("1", "a"), named("1", "b")]));
    }
}
