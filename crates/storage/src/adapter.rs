//! Best-effort JSON collections on top of a key/value backend.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::backend::KeyValueStore;

/// Reads and writes whole collections as JSON arrays.
///
/// Loading never fails: a missing key, an unreadable backend or a payload
/// that does not parse all yield an empty collection. Saving never fails
/// either: backend errors are logged and dropped.
///
/// Cheaply cloneable; clones share the backend.
#[derive(Debug, Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistentStore {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Load the collection saved under `key`, or an empty one.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read stored collection");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                debug!(key = %key, count = records.len(), "Loaded stored collection");
                records
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable stored collection");
                Vec::new()
            }
        }
    }

    /// Save `records` under `key`.
    ///
    /// Returns whether the write reached the backend. Callers are free to
    /// ignore it; failures are already logged.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> bool {
        let payload = match serde_json::to_string(records) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize collection");
                return false;
            }
        };

        match self.backend.set(key, &payload) {
            Ok(()) => {
                debug!(key = %key, count = records.len(), "Saved collection");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to save collection");
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;

    fn store_with(backend: &Arc<MemoryStore>) -> PersistentStore {
        PersistentStore::new(Arc::clone(backend) as Arc<dyn KeyValueStore>)
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = PersistentStore::new(Arc::new(MemoryStore::new()));
        let loaded: Vec<u32> = store.load("localClients_v1");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_corrupted_json_is_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.insert_raw("localClients_v1", "{not json");
        let loaded: Vec<u32> = store_with(&backend).load("localClients_v1");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.insert_raw("cart", r#"{"items": [1, 2]}"#);
        let loaded: Vec<u32> = store_with(&backend).load("cart");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = PersistentStore::new(Arc::new(MemoryStore::new()));
        assert!(store.save("numbers", &[3_u32, 1, 2]));
        let loaded: Vec<u32> = store.load("numbers");
        assert_eq!(loaded, vec![3, 1, 2]);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let backend = Arc::new(MemoryStore::with_quota(8));
        let store = store_with(&backend);
        assert!(store.save("n", &[1_u32]));

        // Over quota: reported as not persisted, previous payload kept.
        assert!(!store.save("n", &[1_u32, 2, 3, 4, 5, 6, 7, 8]));
        let loaded: Vec<u32> = store.load("n");
        assert_eq!(loaded, vec![1]);
    }
}
