use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::traits::{KeyValue, PutOutcome, StoreGateway};

/// In-memory, HashMap-based store gateway.
///
/// Intended for tests and embedding. Revisions are a single monotonic
/// counter bumped on every write, mirroring etcd's store-wide revision.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    entries: HashMap<String, KeyValue>,
    revision: i64,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                revision: 0,
            }),
        }
    }

    /// Seed a value directly, returning the revision it was stored at.
    pub fn insert(&self, key: impl Into<String>, value: Vec<u8>) -> i64 {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.revision += 1;
        let revision = inner.revision;
        inner.entries.insert(key.into(), KeyValue { value, revision });
        revision
    }

    /// The raw bytes currently stored at `key`, if any.
    pub fn raw_value(&self, key: &str) -> Option<Vec<u8>> {
        let inner = self.inner.read().expect("lock poisoned");
        inner.entries.get(key).map(|kv| kv.value.clone())
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").entries.len()
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreGateway for InMemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<KeyValue>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.entries.get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        expected_revision: Option<i64>,
    ) -> StoreResult<PutOutcome> {
        let mut inner = self.inner.write().expect("lock poisoned");
        if let Some(expected) = expected_revision {
            let current = inner.entries.get(key).map(|kv| kv.revision).unwrap_or(0);
            if current != expected {
                return Ok(PutOutcome::Conflict);
            }
        }
        inner.revision += 1;
        let revision = inner.revision;
        inner
            .entries
            .insert(key.to_string(), KeyValue { value, revision });
        Ok(PutOutcome::Committed(revision))
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("key_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Get / put
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let store = InMemoryStore::new();
        assert!(store.get("/registry/persistentvolumes/pv-404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get() {
        let store = InMemoryStore::new();
        let outcome = store.put("/k", b"v".to_vec(), None).await.unwrap();
        assert!(matches!(outcome, PutOutcome::Committed(1)));

        let kv = store.get("/k").await.unwrap().expect("should exist");
        assert_eq!(kv.value, b"v");
        assert_eq!(kv.revision, 1);
    }

    #[tokio::test]
    async fn revisions_are_monotonic() {
        let store = InMemoryStore::new();
        let r1 = store.insert("/a", b"1".to_vec());
        let r2 = store.insert("/b", b"2".to_vec());
        assert!(r2 > r1);
    }

    // -----------------------------------------------------------------------
    // Compare-and-swap
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn conditional_put_commits_at_observed_revision() {
        let store = InMemoryStore::new();
        let rev = store.insert("/k", b"old".to_vec());

        let outcome = store.put("/k", b"new".to_vec(), Some(rev)).await.unwrap();
        assert!(matches!(outcome, PutOutcome::Committed(_)));
        assert_eq!(store.raw_value("/k").unwrap(), b"new");
    }

    #[tokio::test]
    async fn conditional_put_conflicts_after_concurrent_write() {
        let store = InMemoryStore::new();
        let rev = store.insert("/k", b"old".to_vec());
        store.insert("/k", b"concurrent".to_vec());

        let outcome = store.put("/k", b"new".to_vec(), Some(rev)).await.unwrap();
        assert!(matches!(outcome, PutOutcome::Conflict));
        // Conflict writes nothing.
        assert_eq!(store.raw_value("/k").unwrap(), b"concurrent");
    }

    #[tokio::test]
    async fn conditional_put_conflicts_on_deleted_key() {
        let store = InMemoryStore::new();
        let outcome = store.put("/gone", b"new".to_vec(), Some(7)).await.unwrap();
        assert!(matches!(outcome, PutOutcome::Conflict));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unconditional_put_overwrites() {
        let store = InMemoryStore::new();
        store.insert("/k", b"old".to_vec());
        store.insert("/k", b"newer".to_vec());
        let outcome = store.put("/k", b"forced".to_vec(), None).await.unwrap();
        assert!(matches!(outcome, PutOutcome::Committed(_)));
        assert_eq!(store.raw_value("/k").unwrap(), b"forced");
    }
}
