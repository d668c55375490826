//! Kubernetes storage codec for resetpv.
//!
//! kube-apiserver persists objects in etcd as a 4-byte magic prefix
//! (`k8s\0`) followed by a protobuf `runtime.Unknown` envelope whose `raw`
//! field carries the object's own protobuf serialization. This crate
//! decodes that format just far enough to reach the two deletion markers in
//! the object's metadata, and re-encodes it so the control plane can keep
//! reading the record afterwards.
//!
//! # Design Rules
//!
//! 1. Preserve-unknown: every field the codec does not model is carried as
//!    raw wire bytes and re-emitted verbatim. Dropping or re-defaulting a
//!    field would corrupt the object for the control plane.
//! 2. The only mutation offered is clearing the deletion timestamp and the
//!    deletion grace period. Nothing else is writable.
//! 3. Encoding is deterministic but not required to reproduce the original
//!    bytes exactly; it must only stay parseable by the same decoder and by
//!    the control plane.
//!
//! # Key Types
//!
//! - [`StoredObject`] — One decoded storage record
//! - [`Time`] — The `meta.v1.Time` message used by the deletion timestamp
//! - [`CodecError`] — Decode/encode failure taxonomy

pub mod envelope;
pub mod error;
pub mod object;
mod wire;

pub use envelope::{Time, TypeMeta, STORAGE_MAGIC};
pub use error::{CodecError, CodecResult};
pub use object::StoredObject;
