//! Foundation types for resetpv.
//!
//! This crate provides the resource model shared by every other resetpv
//! crate: which Kubernetes kinds the tool can repair, how a single target
//! resource is described, and how that target maps to the etcd key the
//! control plane's storage layer uses for it.
//!
//! # Key Types
//!
//! - [`ResourceKind`] — Closed set of repairable kinds with their storage
//!   attributes (plural path segment, API version, scoping)
//! - [`ResourceRef`] — One concrete target: kind + optional namespace + name
//! - [`storage_key`] — Pure mapping from a target to its etcd key path

pub mod error;
pub mod key;
pub mod kind;
pub mod reference;

pub use error::TypeError;
pub use key::storage_key;
pub use kind::ResourceKind;
pub use reference::ResourceRef;
