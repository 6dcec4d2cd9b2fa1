//! Error types for store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// A version conflict is **not** an error: it is reported through
/// [`crate::WriteOutcome::Conflict`]. Everything here is fatal to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stored document could not be read back.
    #[error("store corrupted: {0}")]
    Corrupted(String),

    /// The key contains characters the store cannot address.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// The store is unreachable or refused the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
