use resetpv_codec::CodecError;
use resetpv_store::StoreError;
use resetpv_types::ResourceKind;
use thiserror::Error;

/// Failure taxonomy for one repair invocation.
///
/// Every variant propagates immediately; nothing is retried internally.
/// Only a committed step-7 write changes the store, so any of these means
/// the object is still in whatever state it was found in.
#[derive(Debug, Error)]
pub enum RepairError {
    /// Connect, get, put, or deadline failure. Retryable after diagnosis.
    #[error("store transport failure: {0}")]
    Transport(#[from] StoreError),

    /// No value at the computed key. The key is included so an operator
    /// can spot a wrong prefix or name.
    #[error("no object found in etcd at key [{key}]; check the key prefix and the resource name")]
    NotFound { key: String },

    /// The stored bytes are malformed or belong to a different kind.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The object has no deletion timestamp — it was never being deleted,
    /// or a previous repair already fixed it. Distinct from a hard failure
    /// so operators don't mistake "nothing to do" for a bug.
    #[error("{kind} [{name}] is not in terminating status")]
    NotTerminating { kind: ResourceKind, name: String },

    /// The store revision advanced between fetch and write; something else
    /// modified the object concurrently. Nothing was written.
    #[error("object at [{key}] changed concurrently (revision advanced past {revision}); nothing written, re-run after diagnosis")]
    Conflict { key: String, revision: i64 },
}

/// Result alias for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;
