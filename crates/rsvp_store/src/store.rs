//! Versioned store trait definition.

use crate::error::{StoreError, StoreResult};
use std::fmt;

/// Opaque version token assigned by a store on every committed write.
///
/// Callers never construct versions for existing documents; they only hand
/// back the token they read.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    /// Creates a version from its raw representation.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw representation.
    #[inline]
    #[must_use]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// Returns the version that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self.0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A document read from a store together with its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The opaque document bytes.
    pub bytes: Vec<u8>,
    /// The version the bytes were read at.
    pub version: Version,
}

/// Outcome of a conditional write that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The write was applied; the document now has this version.
    Committed(Version),
    /// The expected version no longer matched. Nothing was written.
    Conflict,
}

impl WriteOutcome {
    /// Returns true if the write was applied.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, WriteOutcome::Committed(_))
    }
}

/// A key-value store holding one versioned document per key.
///
/// # Invariants
///
/// - `read` returns the bytes of the last committed write and its version
/// - `write_if_version` commits only if `expected` equals the current version
/// - `expected = None` commits only if no document exists (create-if-absent)
/// - A document is replaced whole; readers never observe a partial write
/// - Stores must be `Send + Sync` for concurrent access
///
/// There is deliberately no read-modify-write primitive beyond the
/// conditional write.
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
/// - [`super::FileStore`] - For persistent storage
pub trait VersionedStore: Send + Sync {
    /// Reads the document stored under `key`.
    ///
    /// Returns `None` if no document was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or the stored
    /// document is unreadable.
    fn read(&self, key: &str) -> StoreResult<Option<Snapshot>>;

    /// Writes `bytes` under `key` if the current version equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns an error only for store faults. A version mismatch is
    /// reported as [`WriteOutcome::Conflict`].
    fn write_if_version(
        &self,
        key: &str,
        bytes: &[u8],
        expected: Option<Version>,
    ) -> StoreResult<WriteOutcome>;
}

impl<S: VersionedStore + ?Sized> VersionedStore for std::sync::Arc<S> {
    fn read(&self, key: &str) -> StoreResult<Option<Snapshot>> {
        (**self).read(key)
    }

    fn write_if_version(
        &self,
        key: &str,
        bytes: &[u8],
        expected: Option<Version>,
    ) -> StoreResult<WriteOutcome> {
        (**self).write_if_version(key, bytes, expected)
    }
}

/// Checks that a key is addressable by every store.
///
/// Keys are non-empty, at most 128 bytes, and made of ASCII letters,
/// digits, `_`, `-` and `.`. A key may not start with `.`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidKey`] if the key is rejected.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_next_increments() {
        let v = Version::from_raw(7);
        assert_eq!(v.next().as_raw(), 8);
        assert!(v < v.next());
    }

    #[test]
    fn version_display() {
        assert_eq!(Version::from_raw(3).to_string(), "v3");
        assert_eq!(format!("{:?}", Version::from_raw(3)), "Version(3)");
    }

    #[test]
    fn write_outcome_committed() {
        assert!(WriteOutcome::Committed(Version::from_raw(1)).is_committed());
        assert!(!WriteOutcome::Conflict.is_committed());
    }

    #[test]
    fn valid_keys_accepted() {
        assert!(validate_key("rsvps").is_ok());
        assert!(validate_key("event-2026.rsvps_v1").is_ok());
    }

    #[test]
    fn invalid_keys_rejected() {
        for key in ["", ".hidden", "a/b", "../escape", "with space", "ümlaut"] {
            assert!(
                matches!(validate_key(key), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
        assert!(validate_key(&"k".repeat(129)).is_err());
    }

    proptest::proptest! {
        #[test]
        fn generated_keys_accepted(key in "[A-Za-z0-9_-][A-Za-z0-9_.-]{0,127}") {
            proptest::prop_assert!(validate_key(&key).is_ok());
        }

        #[test]
        fn keys_with_separators_rejected(prefix in "[a-z]{1,8}", sep in "[/\\\\ :]") {
            let key = format!("{prefix}{sep}x");
            proptest::prop_assert!(validate_key(&key).is_err());
        }
    }
}
