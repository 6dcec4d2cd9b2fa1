//! In-memory versioned store for testing.

use crate::error::{StoreError, StoreResult};
use crate::store::{validate_key, Snapshot, Version, VersionedStore, WriteOutcome};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// An in-memory versioned store.
///
/// Documents live in a map guarded by a lock; the lock is held only for the
/// duration of a single `read` or `write_if_version` call, which is exactly
/// the atomicity an external key-value store provides.
///
/// Besides being a plain store it exposes fault-injection hooks for tests:
/// - [`InMemoryStore::force_conflicts`] makes the next writes lose the CAS
/// - [`InMemoryStore::fail_reads`] / [`InMemoryStore::fail_writes`] simulate an unreachable store
/// - [`InMemoryStore::read_count`] / [`InMemoryStore::write_count`] count calls
///
/// # Example
///
/// ```rust
/// use rsvp_store::{InMemoryStore, VersionedStore, WriteOutcome};
///
/// let store = InMemoryStore::new();
/// store.force_conflicts(1);
/// assert_eq!(
///     store.write_if_version("doc", b"x", None).unwrap(),
///     WriteOutcome::Conflict
/// );
/// assert!(store.write_if_version("doc", b"x", None).unwrap().is_committed());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    docs: RwLock<HashMap<String, Snapshot>>,
    last_version: AtomicU64,
    forced_conflicts: AtomicU32,
    reads_fail: AtomicBool,
    writes_fail: AtomicBool,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with a pre-existing document under `key`.
    ///
    /// Useful for starting tests from a known state.
    #[must_use]
    pub fn with_document(key: &str, bytes: Vec<u8>) -> Self {
        let store = Self::new();
        let version = Version::from_raw(store.last_version.fetch_add(1, Ordering::SeqCst) + 1);
        store
            .docs
            .write()
            .insert(key.to_string(), Snapshot { bytes, version });
        store
    }

    /// Makes the next `count` conditional writes report a conflict
    /// without touching the stored document.
    pub fn force_conflicts(&self, count: u32) {
        self.forced_conflicts.store(count, Ordering::SeqCst);
    }

    /// Makes every read fail with [`StoreError::Unavailable`] while set.
    pub fn fail_reads(&self, fail: bool) {
        self.reads_fail.store(fail, Ordering::SeqCst);
    }

    /// Makes every write fail with [`StoreError::Unavailable`] while set.
    pub fn fail_writes(&self, fail: bool) {
        self.writes_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `read` calls served so far, including failed ones.
    #[must_use]
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `write_if_version` calls served so far, including
    /// conflicts and failures.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns a copy of the raw document under `key`, bypassing counters
    /// and injected faults.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<Snapshot> {
        self.docs.read().get(key).cloned()
    }

    /// Takes one forced conflict if any are pending.
    fn take_forced_conflict(&self) -> bool {
        self.forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl VersionedStore for InMemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<Snapshot>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        validate_key(key)?;

        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".into()));
        }

        Ok(self.docs.read().get(key).cloned())
    }

    fn write_if_version(
        &self,
        key: &str,
        bytes: &[u8],
        expected: Option<Version>,
    ) -> StoreResult<WriteOutcome> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        validate_key(key)?;

        if self.writes_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        if self.take_forced_conflict() {
            return Ok(WriteOutcome::Conflict);
        }

        let mut docs = self.docs.write();
        let current = docs.get(key).map(|doc| doc.version);
        if current != expected {
            return Ok(WriteOutcome::Conflict);
        }

        let version = Version::from_raw(self.last_version.fetch_add(1, Ordering::SeqCst) + 1);
        docs.insert(
            key.to_string(),
            Snapshot {
                bytes: bytes.to_vec(),
                version,
            },
        );
        Ok(WriteOutcome::Committed(version))
    }
}
