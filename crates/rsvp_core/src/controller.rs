//! Optimistic read-transform-write loop over the shared document.

use crate::collection::Collection;
use crate::config::RetryConfig;
use crate::transform::{Change, Rejection};
use rsvp_store::{StoreError, StoreResult, Version, VersionedStore, WriteOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Result of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    /// What the transform reported.
    pub value: T,
    /// Attempt on which the mutation took effect (1-based).
    pub attempts: u32,
    /// Version of the document after the mutation. `None` if nothing was
    /// ever written under the key.
    pub version: Option<Version>,
}

/// Why a mutation did not take effect.
#[derive(Debug, Error)]
pub enum MutationError {
    /// The transform refused the mutation.
    #[error("rejected: {0}")]
    Rejected(Rejection),

    /// Every attempt lost the compare-and-swap.
    #[error("busy after {attempts} attempts")]
    Busy {
        /// Number of attempts made.
        attempts: u32,
    },

    /// The store failed. Never retried.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The stored document is not a valid collection, or the new one
    /// could not be encoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The caller abandoned the request between attempts.
    #[error("cancelled")]
    Cancelled,
}

/// Shared flag a caller sets to abandon a mutation.
///
/// The flag is checked before every attempt. A write that has already
/// committed stays committed.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How one conditional write ended, from the controller's point of view.
#[derive(Debug)]
enum AttemptOutcome {
    Committed(Version),
    Conflict,
    Fatal(StoreError),
}

impl From<StoreResult<WriteOutcome>> for AttemptOutcome {
    fn from(result: StoreResult<WriteOutcome>) -> Self {
        match result {
            Ok(WriteOutcome::Committed(version)) => AttemptOutcome::Committed(version),
            Ok(WriteOutcome::Conflict) => AttemptOutcome::Conflict,
            Err(e) => AttemptOutcome::Fatal(e),
        }
    }
}

/// Drives a transform against the document under one key.
///
/// The controller is built per request and holds no collection between
/// calls: every attempt re-reads the document, re-applies the transform to
/// what it read and writes back only if the version is still the one it
/// read.
///
/// ```text
/// Reading -> Transforming -> Writing -> Applied
///    ^                          |
///    +------- Backoff <---------+ conflict (until max_attempts -> Busy)
/// ```
///
/// - An absent document reads as an empty collection with no version
/// - A transform rejection ends the loop without consuming a retry
/// - A store error ends the loop and is never retried
#[derive(Debug)]
pub struct MutationController<'a, S: VersionedStore + ?Sized> {
    store: &'a S,
    key: &'a str,
    retry: &'a RetryConfig,
    cancel: Option<&'a CancelFlag>,
}

impl<'a, S: VersionedStore + ?Sized> MutationController<'a, S> {
    /// Creates a controller for the document under `key`.
    pub fn new(store: &'a S, key: &'a str, retry: &'a RetryConfig) -> Self {
        Self {
            store,
            key,
            retry,
            cancel: None,
        }
    }

    /// Abandons the mutation at the next attempt boundary once `flag` is set.
    pub fn with_cancel(mut self, flag: &'a CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Reads the current collection and its version.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the document does not decode.
    pub fn read_current(&self) -> Result<(Collection, Option<Version>), MutationError> {
        match self.store.read(self.key)? {
            Some(snapshot) => Ok((Collection::decode(&snapshot.bytes)?, Some(snapshot.version))),
            None => Ok((Collection::new(), None)),
        }
    }

    /// Applies `transform` until a write commits, the transform rejects,
    /// the store fails, or attempts run out.
    ///
    /// # Errors
    ///
    /// - [`MutationError::Rejected`] if the transform refuses
    /// - [`MutationError::Busy`] after `max_attempts` conflicts
    /// - [`MutationError::Store`] / [`MutationError::Codec`] on fatal faults
    /// - [`MutationError::Cancelled`] if the cancel flag is set
    pub fn mutate<T, F>(&self, mut transform: F) -> Result<Applied<T>, MutationError>
    where
        F: FnMut(&Collection) -> Result<Change<T>, Rejection>,
    {
        let max_attempts = self.retry.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            if self.cancel.is_some_and(CancelFlag::is_cancelled) {
                debug!(key = self.key, attempt, "mutation cancelled");
                return Err(MutationError::Cancelled);
            }

            let (current, version) = self.read_current()?;
            debug!(key = self.key, attempt, records = current.len(), ?version, "read document");

            let (next, value) = match transform(&current).map_err(MutationError::Rejected)? {
                Change::Write(next, value) => (next, value),
                Change::Unchanged(value) => {
                    return Ok(Applied {
                        value,
                        attempts: attempt,
                        version,
                    })
                }
            };

            let bytes = next.encode()?;
            match AttemptOutcome::from(self.store.write_if_version(self.key, &bytes, version)) {
                AttemptOutcome::Committed(new_version) => {
                    debug!(key = self.key, attempt, version = %new_version, "write committed");
                    return Ok(Applied {
                        value,
                        attempts: attempt,
                        version: Some(new_version),
                    });
                }
                AttemptOutcome::Conflict => {
                    debug!(key = self.key, attempt, "version conflict");
                    if attempt < max_attempts {
                        let delay = self.retry.delay_for_attempt(attempt);
                        if !delay.is_zero() {
                            std::thread::sleep(delay);
                        }
                    }
                }
                AttemptOutcome::Fatal(e) => {
                    error!(key = self.key, attempt, error = %e, "store write failed");
                    return Err(MutationError::Store(e));
                }
            }
        }

        warn!(key = self.key, attempts = max_attempts, "giving up after repeated conflicts");
        Err(MutationError::Busy {
            attempts: max_attempts,
        })
    }
}
