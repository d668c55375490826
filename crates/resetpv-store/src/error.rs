use thiserror::Error;

/// Errors from store gateway operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connectivity or protocol failure talking to the store.
    #[error("store transport error: {0}")]
    Transport(String),

    /// The operation deadline elapsed. Callers cannot distinguish "too
    /// slow" from "unreachable"; both are retryable after diagnosis.
    #[error("store operation timed out")]
    Timeout,

    /// TLS material could not be loaded from disk.
    #[error("cannot load TLS material from {path}: {source}")]
    TlsMaterial {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The store answered with something the gateway cannot interpret.
    #[error("invalid store response: {0}")]
    InvalidResponse(String),
}

impl From<etcd_client::Error> for StoreError {
    fn from(err: etcd_client::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
