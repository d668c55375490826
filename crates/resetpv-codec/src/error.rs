use thiserror::Error;

/// Errors from decoding or encoding a stored Kubernetes object.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value does not start with the `k8s\0` storage magic. The record
    /// was probably persisted with a JSON storage media type, which this
    /// tool does not handle.
    #[error("value is not in the kubernetes protobuf storage format (missing k8s magic prefix)")]
    MissingMagic,

    /// The `runtime.Unknown` envelope could not be decoded.
    #[error("malformed storage envelope: {0}")]
    Envelope(String),

    /// The envelope's type metadata names a different kind than requested.
    #[error("stored object is {found}, expected {expected}")]
    KindMismatch { expected: String, found: String },

    /// The object or metadata wire data ended mid-field.
    #[error("truncated object data")]
    Truncated,

    /// The object or metadata wire data is not valid protobuf.
    #[error("malformed object data: {0}")]
    Malformed(String),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
