//! The operations request handlers call.

use crate::aggregate::{self, AggregateCounts};
use crate::collection::Collection;
use crate::config::ServiceConfig;
use crate::controller::{CancelFlag, MutationController, MutationError};
use crate::error::{CoreError, CoreResult};
use crate::record::{Record, RecordDraft, RecordId};
use crate::transform::{self, Rejection};
use rsvp_store::{validate_key, VersionedStore};
use tracing::info;

impl From<MutationError> for CoreError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::Rejected(Rejection::NotFound(id)) => CoreError::NotFound { id },
            MutationError::Busy { attempts } => CoreError::Busy { attempts },
            MutationError::Store(e) => CoreError::Store(e),
            MutationError::Codec(e) => CoreError::Codec(e),
            MutationError::Cancelled => CoreError::Cancelled,
        }
    }
}

/// Append, delete and read access to the shared collection.
///
/// The service holds the store handle and its configuration, nothing else.
/// Every call reads the document afresh, so any number of services, in
/// any number of processes, can work on the same store at once.
///
/// # Example
///
/// ```rust
/// use rsvp_core::{RecordDraft, RsvpService, ServiceConfig};
/// use rsvp_store::InMemoryStore;
///
/// let service = RsvpService::new(InMemoryStore::new(), ServiceConfig::default()).unwrap();
/// let record = service.submit(RecordDraft::attending(2, ["Ada", "Grace"])).unwrap();
///
/// let all = service.list_all().unwrap();
/// assert!(all.contains(record.id()));
/// assert_eq!(service.summarize(&all).attending_persons, 2);
/// ```
#[derive(Debug)]
pub struct RsvpService<S: VersionedStore> {
    store: S,
    config: ServiceConfig,
}

impl<S: VersionedStore> RsvpService<S> {
    /// Creates a service over `store`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Store`] if the configured key is not addressable.
    pub fn new(store: S, config: ServiceConfig) -> CoreResult<Self> {
        validate_key(&config.key)?;
        Ok(Self { store, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a controller for the shared document.
    ///
    /// Use it directly to run a mutation that can be cancelled.
    pub fn controller<'a>(&'a self, cancel: Option<&'a CancelFlag>) -> MutationController<'a, S> {
        let controller = MutationController::new(&self.store, &self.config.key, &self.config.retry);
        match cancel {
            Some(flag) => controller.with_cancel(flag),
            None => controller,
        }
    }

    /// Validates a draft and appends the resulting record.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] before any store access, otherwise the
    /// errors of [`RsvpService::append`].
    pub fn submit(&self, draft: RecordDraft) -> CoreResult<Record> {
        let record = Record::from_draft(draft, self.config.policy, &self.config.limits)?;
        self.append(record.clone())?;
        Ok(record)
    }

    /// Appends a record to the collection.
    ///
    /// # Errors
    ///
    /// [`CoreError::Busy`] if every attempt conflicted; [`CoreError::Store`]
    /// or [`CoreError::Codec`] on fatal faults.
    pub fn append(&self, record: Record) -> CoreResult<RecordId> {
        let applied = self.controller(None).mutate(transform::append(record))?;
        info!(id = %applied.value, attempts = applied.attempts, "record appended");
        Ok(applied.value)
    }

    /// Deletes the record with `id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the current collection has no such
    /// record, otherwise the errors of [`RsvpService::append`].
    pub fn delete_by_id(&self, id: RecordId) -> CoreResult<RecordId> {
        let applied = self.controller(None).mutate(transform::delete(id))?;
        info!(id = %applied.value, attempts = applied.attempts, "record deleted");
        Ok(applied.value)
    }

    /// Reads the whole collection. Never writes.
    ///
    /// # Errors
    ///
    /// [`CoreError::Store`] or [`CoreError::Codec`].
    pub fn list_all(&self) -> CoreResult<Collection> {
        let (collection, _) = self.controller(None).read_current()?;
        Ok(collection)
    }

    /// Summarizes a collection.
    pub fn summarize(&self, collection: &Collection) -> AggregateCounts {
        aggregate::summarize(collection)
    }
}
