use async_trait::async_trait;

use crate::error::StoreResult;

/// A value read from the store together with the revision at which it was
/// last modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub value: Vec<u8>,
    pub revision: i64,
}

/// Result of a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PutOutcome {
    /// The write landed; the store is now at this revision.
    Committed(i64),
    /// The compare-and-swap guard failed: the key's revision no longer
    /// matches what the caller observed. Nothing was written.
    Conflict,
}

/// Get/put boundary against the cluster's backing key-value store.
///
/// Implementations never interpret values. A `get` that finds nothing is
/// `Ok(None)`, not an error; only transport-level failures are `Err`.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Fetch the value at `key`, if any, with its modification revision.
    async fn get(&self, key: &str) -> StoreResult<Option<KeyValue>>;

    /// Write `value` at `key`.
    ///
    /// With `expected_revision: Some(rev)` the write only commits if the
    /// key's modification revision still equals `rev` (compare-and-swap);
    /// otherwise [`PutOutcome::Conflict`] is returned and the store is
    /// untouched. `None` overwrites unconditionally.
    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        expected_revision: Option<i64>,
    ) -> StoreResult<PutOutcome>;
}
