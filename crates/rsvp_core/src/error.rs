//! Error types for rsvpdb core.

use crate::record::RecordId;
use rsvp_store::StoreError;
use thiserror::Error;

/// Result type for service operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// A draft failed validation before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A text field is longer than its cap.
    #[error("{field} exceeds {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum allowed length in characters.
        max: usize,
    },

    /// Party size is above the configured maximum.
    #[error("party size {size} exceeds maximum {max}")]
    PartyTooLarge {
        /// Requested party size.
        size: u32,
        /// Maximum allowed party size.
        max: u32,
    },

    /// More names than allowed.
    #[error("too many names: {count} (maximum {max})")]
    TooManyNames {
        /// Number of names supplied.
        count: usize,
        /// Maximum allowed number of names.
        max: usize,
    },

    /// An attending response with a party size of zero.
    #[error("attending response requires a party size of at least 1")]
    MissingPartySize,

    /// An attending response without names.
    #[error("attending response requires at least one name")]
    MissingNames,

    /// A declined response carrying attendees.
    #[error("declined response carries party size {party_size} and {names} names")]
    DeclineWithParty {
        /// Party size supplied.
        party_size: u32,
        /// Number of names supplied.
        names: usize,
    },

    /// A record id that is not a UUID.
    #[error("invalid record id: {0:?}")]
    InvalidId(String),
}

/// A stored collection violates a collection invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Two records share an id.
    #[error("duplicate record id {0}")]
    DuplicateId(RecordId),

    /// A record breaks the attendance consistency rule.
    #[error("record {id} is inconsistent: {source}")]
    Inconsistent {
        /// The offending record.
        id: RecordId,
        /// The rule it breaks.
        source: ValidationError,
    },
}

/// Errors surfaced by [`crate::RsvpService`].
///
/// Version conflicts never appear here: they are retried inside the
/// mutation controller and only show up as [`CoreError::Busy`] once the
/// retry budget is spent.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The draft was rejected before any store interaction.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No record with this id exists in the current collection.
    #[error("record not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: RecordId,
    },

    /// Every attempt lost the compare-and-swap; the caller may retry later.
    #[error("store busy: gave up after {attempts} conflicting attempts")]
    Busy {
        /// Number of attempts made.
        attempts: u32,
    },

    /// The store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The stored document could not be decoded or encoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The request was abandoned before it could commit.
    #[error("mutation cancelled")]
    Cancelled,
}

impl CoreError {
    /// Returns true if the same request may succeed when issued again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Busy { .. })
    }
}
