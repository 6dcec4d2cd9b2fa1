//! # rsvpdb Core
//!
//! Concurrency-safe mutation engine for a shared RSVP collection.
//!
//! This crate provides:
//! - The [`Record`] and [`Collection`] model and its invariants
//! - Draft sanitization and validation
//! - Pure [`transform`]s: append a record, delete a record by id
//! - The [`MutationController`]: read → transform → conditional write → retry
//! - Pluggable [`BackoffPolicy`] between conflicting attempts
//! - The [`summarize`] aggregator
//! - [`RsvpService`], the boundary request handlers call
//!
//! ## Key Invariants
//!
//! - The store is the only source of truth; nothing caches the collection
//! - Every retry re-reads the document, so no committed record is lost
//! - Only version conflicts are retried; every other failure surfaces
//! - Running out of attempts is [`CoreError::Busy`], never a silent success
//! - Record ids are unique within the collection

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod aggregate;
mod backoff;
mod collection;
mod config;
mod controller;
mod error;
mod record;
mod service;
pub mod transform;

pub use aggregate::{summarize, AggregateCounts};
pub use backoff::{BackoffPolicy, LinearBackoff, NoBackoff};
pub use collection::Collection;
pub use config::{RetryConfig, ServiceConfig, DEFAULT_KEY};
pub use controller::{Applied, CancelFlag, MutationController, MutationError};
pub use error::{CollectionError, CoreError, CoreResult, ValidationError};
pub use record::{Attendance, AttendancePolicy, Limits, Record, RecordDraft, RecordId};
pub use service::RsvpService;
pub use transform::{Change, Rejection};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
