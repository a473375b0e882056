//! Write lock over a [`FileStore`](super::FileStore) directory.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;
use tracing::{debug, warn};

use crate::error::StorageError;

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive advisory lock held for the temp-file/rename sequence of one
/// write. Unlocks on drop.
#[derive(Debug)]
pub(super) struct WriteLock {
    file: File,
}

impl WriteLock {
    /// Lock the file at `path`, retrying while another process holds it.
    ///
    /// # Errors
    ///
    /// [`StorageError::LockTimeout`] once `timeout` passes without getting
    /// the lock, [`StorageError::Lock`] when the lock file cannot be opened
    /// or locked for any other reason.
    pub(super) fn acquire(path: &Path, timeout: Duration) -> Result<Self, StorageError> {
        let lock_err = |source| StorageError::Lock {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(lock_err)?;

        let started = Instant::now();
        loop {
            match FileExt::try_lock_exclusive(&file) {
                Ok(()) => {
                    debug!(path = %path.display(), waited = ?started.elapsed(), "store lock taken");
                    return Ok(Self { file });
                }
                Err(err) if err.kind() == fs2::lock_contended_error().kind() => {}
                Err(source) => return Err(lock_err(source)),
            }

            let waited = started.elapsed();
            if waited >= timeout {
                warn!(path = %path.display(), ?waited, "another writer still holds the store lock");
                return Err(StorageError::LockTimeout {
                    path: path.to_path_buf(),
                    waited,
                });
            }
            thread::sleep(RETRY_INTERVAL);
        }
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
