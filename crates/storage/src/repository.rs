//! Write-through record collections.

use std::mem;

use loja_core::{Record, RecordId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::adapter::PersistentStore;
use crate::collection::{self, CollectionOp};
use crate::merge::merge_local_wins;

/// An in-memory collection of records mirrored to one storage key.
///
/// Every mutation is applied in memory and then written through to the
/// [`PersistentStore`]. Write failures are logged by the store and leave the
/// in-memory collection as the source of truth until the next write.
#[derive(Debug)]
pub struct Repository<T> {
    key: &'static str,
    store: PersistentStore,
    records: Vec<T>,
}

impl<T> Repository<T>
where
    T: Record + Clone + Serialize + DeserializeOwned,
{
    /// Open the repository for `key`, starting from whatever was saved there.
    #[must_use]
    pub fn open(key: &'static str, store: PersistentStore) -> Self {
        let records = store.load(key);
        Self {
            key,
            store,
            records,
        }
    }

    /// Storage key this repository writes to.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Current records, newest local creations first.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Look up a record by identifier.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&T> {
        collection::position(&self.records, id).and_then(|i| self.records.get(i))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a record at the front.
    ///
    /// The caller supplies a fresh identifier; no duplicate check is made.
    pub fn create(&mut self, record: T) {
        self.apply(CollectionOp::Create(record));
    }

    /// Replace the record with the same identifier, keeping its position.
    ///
    /// Returns whether a record was replaced. A miss is not an error.
    pub fn update(&mut self, record: T) -> bool {
        let found = collection::position(&self.records, record.id()).is_some();
        self.apply(CollectionOp::Update(record));
        found
    }

    /// Remove every record with `id`.
    ///
    /// Returns how many records were removed.
    pub fn delete(&mut self, id: &RecordId) -> usize {
        let before = self.records.len();
        self.apply(CollectionOp::Delete(id.clone()));
        before - self.records.len()
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.apply(CollectionOp::Clear);
    }

    /// Fold a freshly fetched remote snapshot into the collection.
    ///
    /// The local side of the merge is re-read from storage rather than taken
    /// from memory, so the merge always runs against what was last persisted.
    /// Only call this with a successful fetch; on failure, leave the
    /// repository alone.
    #[instrument(skip(self, remote), fields(key = %self.key, remote = remote.len()))]
    pub fn replace_from_remote(&mut self, remote: &[T]) {
        let local: Vec<T> = self.store.load(self.key);
        self.records = merge_local_wins(local, remote);
        self.persist();
        debug!(count = self.records.len(), "Collection refreshed from remote");
    }

    fn apply(&mut self, op: CollectionOp<T>) {
        let records = mem::take(&mut self.records);
        self.records = collection::apply(records, op);
        self.persist();
    }

    fn persist(&self) {
        self.store.save(self.key, &self.records);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use crate::backend::{KeyValueStore, MemoryStore};
    use crate::collection::has_unique_ids;
    use crate::collection::tests::{Named, named};

    const KEY: &str = "localClients_v1";

    fn memory_store() -> PersistentStore {
        PersistentStore::new(Arc::new(MemoryStore::new()))
    }

    // =========================================================================
    // Write-through
    // =========================================================================

    #[test]
    fn test_open_loads_saved_collection() {
        let store = memory_store();
        store.save(KEY, &[named("1", "Bob")]);

        let repo: Repository<Named> = Repository::open(KEY, store);
        assert_eq!(repo.records(), &[named("1", "Bob")]);
    }

    #[test]
    fn test_open_with_corrupted_payload_is_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.insert_raw(KEY, "[{\"id\": 1, \"name\":");

        let store = PersistentStore::new(backend as Arc<dyn KeyValueStore>);
        let repo: Repository<Named> = Repository::open(KEY, store);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let store = memory_store();
        let mut repo: Repository<Named> = Repository::open(KEY, store.clone());

        repo.create(named("1", "Bob"));
        repo.create(named("local-1", "Ana"));
        assert_eq!(store.load::<Named>(KEY), repo.records());

        assert!(repo.update(named("1", "Robert")));
        assert_eq!(store.load::<Named>(KEY), repo.records());

        assert_eq!(repo.delete(&RecordId::from("local-1")), 1);
        assert_eq!(store.load::<Named>(KEY), vec![named("1", "Robert")]);

        repo.clear();
        assert!(store.load::<Named>(KEY).is_empty());
    }

    #[test]
    fn test_update_and_delete_misses_are_noops() {
        let mut repo: Repository<Named> = Repository::open(KEY, memory_store());
        repo.create(named("1", "Bob"));

        assert!(!repo.update(named("2", "Nobody")));
        assert_eq!(repo.delete(&RecordId::Remote(2)), 0);
        assert_eq!(repo.records(), &[named("1", "Bob")]);
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let backend = Arc::new(MemoryStore::with_quota(40));
        let store = PersistentStore::new(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        let mut repo: Repository<Named> = Repository::open(KEY, store.clone());

        repo.create(named("1", "a"));
        repo.create(named("2", "a much longer name that blows the quota"));

        assert_eq!(repo.len(), 2);
        assert_eq!(store.load::<Named>(KEY), vec![named("1", "a")]);
    }

    #[test]
    fn test_get() {
        let mut repo: Repository<Named> = Repository::open(KEY, memory_store());
        repo.create(named("local-7", "Ana"));
        assert_eq!(repo.get(&RecordId::from("local-7")), Some(&named("local-7", "Ana")));
        assert_eq!(repo.get(&RecordId::Remote(7)), None);
    }

    // =========================================================================
    // Remote refresh
    // =========================================================================

    #[test]
    fn test_replace_from_remote_keeps_local_records() {
        let mut repo: Repository<Named> = Repository::open(KEY, memory_store());
        repo.create(named("local-1", "Ana"));

        repo.replace_from_remote(&[named("1", "Bob"), named("local-1", "AnaRemote")]);

        assert_eq!(repo.records(), &[named("local-1", "Ana"), named("1", "Bob")]);
    }

    #[test]
    fn test_replace_from_remote_rereads_storage() {
        let store = memory_store();
        let mut repo: Repository<Named> = Repository::open(KEY, store.clone());

        // Another handle on the same key writes after this repository opened.
        let mut other: Repository<Named> = Repository::open(KEY, store.clone());
        other.create(named("local-2", "Written elsewhere"));

        repo.replace_from_remote(&[named("1", "Bob")]);
        assert_eq!(
            repo.records(),
            &[named("local-2", "Written elsewhere"), named("1", "Bob")]
        );
        assert_eq!(store.load::<Named>(KEY), repo.records());
    }

    #[test]
    fn test_replace_from_remote_twice_is_stable() {
        let mut repo: Repository<Named> = Repository::open(KEY, memory_store());
        let snapshot = [named("1", "Bob"), named("2", "Eve")];

        repo.replace_from_remote(&snapshot);
        let first = repo.records().to_vec();
        repo.replace_from_remote(&snapshot);
        assert_eq!(repo.records(), &first[..]);
    }

    #[test]
    fn test_edit_after_refresh_survives_next_refresh() {
        let mut repo: Repository<Named> = Repository::open(KEY, memory_store());
        repo.replace_from_remote(&[named("1", "Bob")]);
        repo.update(named("1", "Bob (edited)"));

        repo.replace_from_remote(&[named("1", "Bob"), named("2", "Eve")]);
        assert_eq!(repo.records(), &[named("1", "Bob (edited)"), named("2", "Eve")]);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Step {
        Create(String),
        Update(usize, String),
        Delete(usize),
        Refresh(Vec<u64>),
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            "[a-z]{1,4}".prop_map(Step::Create),
            (0_usize..8, "[a-z]{1,4}").prop_map(|(i, n)| Step::Update(i, n)),
            (0_usize..8).prop_map(Step::Delete),
            prop::collection::vec(0_u64..10, 0..6).prop_map(Step::Refresh),
        ]
    }

    proptest! {
        #[test]
        fn ids_stay_unique(steps in prop::collection::vec(arb_step(), 0..30)) {
            let mut repo: Repository<Named> = Repository::open(KEY, memory_store());
            let mut next_local = 0_i64;

            for step in steps {
                match step {
                    Step::Create(name) => {
                        next_local += 1;
                        repo.create(Named { id: RecordId::local_at(next_local), name });
                    }
                    Step::Update(i, name) => {
                        let id = repo.records().get(i).map_or(RecordId::Remote(99), |r| r.id.clone());
                        repo.update(Named { id, name });
                    }
                    Step::Delete(i) => {
                        let id = repo.records().get(i).map_or(RecordId::Remote(99), |r| r.id.clone());
                        repo.delete(&id);
                    }
                    Step::Refresh(ids) => {
                        let remote: Vec<Named> = ids
                            .into_iter()
                            .map(|id| Named { id: RecordId::Remote(id), name: "remote".to_string() })
                            .collect();
                        repo.replace_from_remote(&remote);
                    }
                }
                prop_assert!(has_unique_ids(repo.records()));
            }
        }
    }
}
