//! # rsvpdb Store
//!
//! Versioned key-value store abstraction for rsvpdb.
//!
//! This crate is the lowest layer of rsvpdb. A store holds one **opaque
//! document** per key together with a version token owned by the store.
//! Stores do not interpret the documents they hold.
//!
//! ## Design Principles
//!
//! - The only write primitive is a conditional write (compare-and-swap)
//! - Conflicts are reported as a typed [`WriteOutcome`], never as an error
//! - Every other failure is a [`StoreError`] and is fatal to the caller
//! - Stores must be `Send + Sync` so stateless handlers can share them
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing, with fault-injection hooks
//! - [`FileStore`] - One file per key, CAS under an OS file lock
//!
//! ## Example
//!
//! ```rust
//! use rsvp_store::{InMemoryStore, VersionedStore, WriteOutcome};
//!
//! let store = InMemoryStore::new();
//! let outcome = store.write_if_version("doc", b"[]", None).unwrap();
//! let version = match outcome {
//!     WriteOutcome::Committed(v) => v,
//!     WriteOutcome::Conflict => unreachable!(),
//! };
//!
//! // A second create-if-absent loses.
//! assert_eq!(
//!     store.write_if_version("doc", b"[1]", None).unwrap(),
//!     WriteOutcome::Conflict
//! );
//!
//! let snapshot = store.read("doc").unwrap().unwrap();
//! assert_eq!(snapshot.version, version);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use store::{validate_key, Snapshot, Version, VersionedStore, WriteOutcome};
