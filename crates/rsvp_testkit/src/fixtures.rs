//! Test fixtures and service helpers.
//!
//! Provides deterministic records and services over temporary stores.

use rsvp_core::{
    AttendancePolicy, Collection, Limits, Record, RecordDraft, RecordId, RetryConfig,
    RsvpService, ServiceConfig,
};
use rsvp_store::{FileStore, InMemoryStore};
use std::sync::Arc;
use tempfile::TempDir;
use time::{Duration, OffsetDateTime};

/// Document key used by fixtures.
pub const TEST_KEY: &str = "rsvps";

/// Deterministic id derived from a seed.
pub fn seeded_id(seed: u32) -> RecordId {
    let mut bytes = [0u8; 16];
    bytes[12..].copy_from_slice(&seed.to_be_bytes());
    RecordId::from_bytes(bytes)
}

/// Deterministic timestamp: `seed` minutes after the Unix epoch.
pub fn seeded_time(seed: u32) -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::minutes(i64::from(seed))
}

/// Builds a record from a draft with a seeded id and timestamp.
pub fn record_from(seed: u32, draft: RecordDraft) -> Record {
    Record::from_parts(
        seeded_id(seed),
        seeded_time(seed),
        draft,
        AttendancePolicy::Reject,
        &Limits::default(),
    )
    .expect("fixture draft must be valid")
}

/// An attending record with `party_size` generated names.
pub fn attending(seed: u32, party_size: u32) -> Record {
    let names = (1..=party_size.max(1)).map(|n| format!("Guest {seed}-{n}"));
    record_from(seed, RecordDraft::attending(party_size, names))
}

/// A declined record.
pub fn declined(seed: u32) -> Record {
    record_from(seed, RecordDraft::not_attending())
}

/// A collection holding `records` in order.
pub fn collection_of(records: impl IntoIterator<Item = Record>) -> Collection {
    let mut collection = Collection::new();
    for record in records {
        collection
            .insert(record)
            .expect("fixture records must have unique ids");
    }
    collection
}

/// A service configuration that retries up to `max_attempts` times
/// without sleeping.
pub fn fast_config(max_attempts: u32) -> ServiceConfig {
    ServiceConfig::new(TEST_KEY).with_retry(RetryConfig::without_backoff(max_attempts))
}

/// A service over a fresh store, with automatic cleanup.
pub struct TestService<S: rsvp_store::VersionedStore> {
    /// The service instance.
    pub service: RsvpService<Arc<S>>,
    /// Shared handle to the store, for inspection and fault injection.
    pub store: Arc<S>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestService<InMemoryStore> {
    /// Creates a service over an in-memory store.
    pub fn memory() -> Self {
        Self::memory_with(fast_config(5))
    }

    /// Creates a service over an in-memory store with `config`.
    pub fn memory_with(config: ServiceConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            service: RsvpService::new(Arc::clone(&store), config)
                .expect("fixture config must be valid"),
            store,
            _temp_dir: None,
        }
    }
}

impl TestService<FileStore> {
    /// Creates a service over a file store in a temporary directory.
    pub fn file() -> Self {
        Self::file_with(fast_config(5))
    }

    /// Creates a service over a file store with `config`.
    pub fn file_with(config: ServiceConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(FileStore::open(temp_dir.path()).expect("Failed to open file store"));
        Self {
            service: RsvpService::new(Arc::clone(&store), config)
                .expect("fixture config must be valid"),
            store,
            _temp_dir: Some(temp_dir),
        }
    }
}

impl<S: rsvp_store::VersionedStore> TestService<S> {
    /// Creates another service sharing the same store, as a separate
    /// request handler would.
    pub fn handler(&self) -> RsvpService<Arc<S>> {
        RsvpService::new(Arc::clone(&self.store), self.service.config().clone())
            .expect("fixture config must be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_ids_are_distinct() {
        assert_ne!(seeded_id(1), seeded_id(2));
        assert_eq!(seeded_id(7), seeded_id(7));
    }

    #[test]
    fn attending_fixture_is_consistent() {
        let record = attending(3, 4);
        assert_eq!(record.party_size(), 4);
        assert_eq!(record.names().len(), 4);
        assert_eq!(record.id(), seeded_id(3));
    }

    #[test]
    fn handlers_share_the_store() {
        let fixture = TestService::memory();
        let other = fixture.handler();

        fixture.service.append(declined(1)).unwrap();
        assert_eq!(other.list_all().unwrap().len(), 1);
    }

    #[test]
    fn file_fixture_works() {
        let fixture = TestService::file();
        fixture.service.append(attending(1, 2)).unwrap();
        assert!(fixture.store.dir().exists());
        assert_eq!(fixture.service.list_all().unwrap().len(), 1);
    }
}
