//! Key-value persistence backends and the typed load/save adapter.

mod lock;
mod persist;

pub use persist::{LoadOutcome, load, load_with_outcome, save};

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::StorageError;
use lock::WriteLock;

/// Key under which the board document is stored.
pub const BOARD_STATE_KEY: &str = "hunt-board:board-state";
/// Key under which user preferences are stored.
pub const USER_PREFS_KEY: &str = "hunt-board:user-prefs";

const LOCK_FILE: &str = ".huntboard.lock";
const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Raw value under `key`, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the value cannot be written durably.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend rejects the removal.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls, for asserting debounce behavior.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a data directory.
///
/// Writes go to a temp file that is renamed over the target while holding
/// an exclusive advisory lock, so readers never see a torn document and two
/// processes never interleave writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`: `:` becomes `__`, other unsafe bytes are
    /// percent-encoded.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }

    fn lock(&self) -> Result<WriteLock, StorageError> {
        WriteLock::acquire(&self.root.join(LOCK_FILE), LOCK_TIMEOUT)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(write_err)?;
        let _guard = self.lock()?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value.as_bytes()).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        debug!(key, path = %path.display(), bytes = value.len(), "wrote store entry");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.root.exists() {
            return Ok(());
        }
        let _guard = self.lock()?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

fn encode_key(key: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut encoded = String::with_capacity(key.len() + 2);
    for byte in key.bytes() {
        if byte == b':' {
            encoded.push_str("__");
        } else if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte == b'.' {
            encoded.push(char::from(byte));
        } else {
            encoded.push('%');
            encoded.push(char::from(HEX[usize::from(byte >> 4)]));
            encoded.push(char::from(HEX[usize::from(byte & 0x0F)]));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn key_maps_to_sanitized_file_name() {
        let store = FileStore::new("/data");
        assert_eq!(
            store.path_for(BOARD_STATE_KEY),
            PathBuf::from("/data/hunt-board__board-state.json")
        );
        assert_eq!(
            store.path_for("a b/c"),
            PathBuf::from("/data/a%20b%2Fc.json")
        );
    }

    #[test]
    fn file_store_roundtrips_values() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get(USER_PREFS_KEY).unwrap(), None);
        store.set(USER_PREFS_KEY, "{\"a\":1}").unwrap();
        assert_eq!(
            store.get(USER_PREFS_KEY).unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        store.set(USER_PREFS_KEY, "{}").unwrap();
        assert_eq!(store.get(USER_PREFS_KEY).unwrap().as_deref(), Some("{}"));
        assert!(!store.path_for(USER_PREFS_KEY).with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = FileStore::new(dir.path());
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn remove_on_missing_root_is_ok() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("never-created"));
        store.remove("k").unwrap();
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
