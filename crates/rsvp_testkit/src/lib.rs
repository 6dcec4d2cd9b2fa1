//! # rsvpdb Testkit
//!
//! Test utilities for rsvpdb.
//!
//! This crate provides:
//! - Fixtures: record builders and services over temporary stores
//! - Property-based test generators using proptest
//! - A concurrent stress harness for the mutation controller
//!
//! ## Usage
//!
//! ```rust
//! use rsvp_testkit::prelude::*;
//!
//! let fixture = TestService::memory();
//! fixture.service.append(attending(1, 2)).unwrap();
//! assert_eq!(fixture.service.list_all().unwrap().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use stress::*;
