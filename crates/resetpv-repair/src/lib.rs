//! The resetpv repair procedure.
//!
//! A Terminating object is one whose deletion timestamp is set but whose
//! deletion never completed, usually because a finalizer wedged. The API
//! server refuses to un-delete such an object, so this crate performs one
//! read-modify-write cycle directly against the backing store:
//!
//! 1. locate the storage key, 2. fetch, 3. decode, 4. check the object is
//! actually terminating, 5. clear the deletion markers, 6. encode,
//! 7. write back.
//!
//! The write is a compare-and-swap on the revision observed at fetch, so a
//! concurrent control-plane change surfaces as an explicit
//! [`RepairError::Conflict`] instead of being overwritten. The tool is
//! still meant to run only while the object's reconciler is quiescent; a
//! conflict means it was not.
//!
//! The procedure is terminal on first failure and never retries. Failures
//! before step 7 leave the store untouched.

pub mod config;
pub mod error;
pub mod procedure;

pub use config::RepairConfig;
pub use error::{RepairError, RepairResult};
pub use procedure::{RepairOutcome, Repairer};
