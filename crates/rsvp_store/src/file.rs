//! File-based versioned store for persistent storage.

use crate::error::{StoreError, StoreResult};
use crate::store::{validate_key, Snapshot, Version, VersionedStore, WriteOutcome};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Magic bytes at the start of every document file.
const MAGIC: [u8; 4] = *b"RSV1";

/// Size of the document header: magic + little-endian version.
const HEADER_SIZE: usize = MAGIC.len() + 8;

/// Extension of document files.
const DOC_EXT: &str = "doc";

/// Extension of the per-key lock files.
const LOCK_EXT: &str = "lock";

/// A file-based versioned store.
///
/// Each key is stored as `<dir>/<key>.doc` with the layout:
///
/// ```text
/// | magic "RSV1" (4) | version u64 LE (8) | payload ... |
/// ```
///
/// # Atomicity
///
/// A conditional write holds an exclusive OS lock on `<dir>/<key>.lock`
/// while it compares versions, writes the new document to a temporary
/// file, syncs it and renames it over the old one. Readers open whatever
/// file is in place and therefore see either the old or the new document,
/// never a mix. The lock is per open file, so it also serializes threads
/// of the same process and separate processes sharing the directory.
///
/// # Example
///
/// ```no_run
/// use rsvp_store::{FileStore, VersionedStore};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("rsvp-data")).unwrap();
/// let outcome = store.write_if_version("rsvps", b"[]", None).unwrap();
/// assert!(outcome.is_committed());
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the path
    /// exists and is not a directory.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(dir)?;
        if !dir.is_dir() {
            return Err(StoreError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("not a directory: {}", dir.display()),
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Returns the directory this store lives in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn doc_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{DOC_EXT}"))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{LOCK_EXT}"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        // Keys never start with '.', so this cannot shadow a document.
        self.dir.join(format!(".{key}.{}.tmp", std::process::id()))
    }

    fn load(&self, key: &str) -> StoreResult<Option<Snapshot>> {
        match fs::read(self.doc_path(key)) {
            Ok(raw) => decode(&raw).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn replace(&self, key: &str, bytes: &[u8], version: Version) -> StoreResult<()> {
        let temp = self.temp_path(key);
        {
            let mut file = File::create(&temp)?;
            file.write_all(&MAGIC)?;
            file.write_all(&version.as_raw().to_le_bytes())?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&temp, self.doc_path(key)) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        #[cfg(unix)]
        File::open(&self.dir)?.sync_all()?;

        Ok(())
    }
}

fn decode(raw: &[u8]) -> StoreResult<Snapshot> {
    if raw.len() < HEADER_SIZE || raw[..MAGIC.len()] != MAGIC {
        return Err(StoreError::Corrupted(format!(
            "bad document header ({} bytes)",
            raw.len()
        )));
    }

    let mut version = [0u8; 8];
    version.copy_from_slice(&raw[MAGIC.len()..HEADER_SIZE]);

    Ok(Snapshot {
        bytes: raw[HEADER_SIZE..].to_vec(),
        version: Version::from_raw(u64::from_le_bytes(version)),
    })
}

impl VersionedStore for FileStore {
    fn read(&self, key: &str) -> StoreResult<Option<Snapshot>> {
        validate_key(key)?;
        self.load(key)
    }

    fn write_if_version(
        &self,
        key: &str,
        bytes: &[u8],
        expected: Option<Version>,
    ) -> StoreResult<WriteOutcome> {
        validate_key(key)?;

        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path(key))?;
        lock.lock_exclusive()?;

        let current = self.load(key)?.map(|doc| doc.version);
        if current != expected {
            return Ok(WriteOutcome::Conflict);
        }

        let version = current.map_or(Version::from_raw(1), |v| v.next());
        self.replace(key, bytes, version)?;

        // Dropping `lock` closes the handle and releases the OS lock.
        Ok(WriteOutcome::Committed(version))
    }
}
