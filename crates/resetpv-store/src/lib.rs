//! Store gateway for resetpv.
//!
//! The repair procedure only ever needs two primitives against the
//! cluster's backing store: fetch the value at a key, and write a value
//! back at that key. This crate defines that boundary as the
//! [`StoreGateway`] trait and provides two implementations:
//!
//! - [`InMemoryStore`] — `HashMap`-based fake for tests and embedding
//! - [`EtcdGateway`] — the real thing, over a mutual-TLS etcd connection
//!
//! # Design Rules
//!
//! 1. The gateway never interprets values; they are opaque bytes.
//! 2. Every read carries the store revision it observed, so writers can
//!    make their write conditional on it.
//! 3. All transport errors are propagated, never silently ignored.

pub mod error;
pub mod etcd;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use etcd::{EtcdConfig, EtcdGateway};
pub use memory::InMemoryStore;
pub use traits::{KeyValue, PutOutcome, StoreGateway};
