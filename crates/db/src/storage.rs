//! Key-value persistence backends.
//!
//! Supports a directory-backed store for normal runs and an in-memory
//! store for tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use pollbox_common::{AppError, AppResult};

/// Storage backend trait.
///
/// A durable mapping from string keys to JSON strings. The store is
/// single-accessor: one process, no concurrent writers.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove the value stored under `key`.
    ///
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Flush pending writes to durable storage.
    fn flush(&self) -> AppResult<()>;
}

/// Local filesystem storage backend.
///
/// Each key is kept as one JSON file under the base directory.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(base_path: P) -> AppResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)
            .map_err(|e| AppError::Storage(format!("failed to create data directory: {e}")))?;
        Ok(Self { base_path })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

impl StorageBackend for LocalStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!("failed to read {key}: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        fs::write(self.key_path(key), value)
            .map_err(|e| AppError::Storage(format!("failed to write {key}: {e}")))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("failed to remove {key}: {e}"))),
        }
    }

    fn flush(&self) -> AppResult<()> {
        // Every set writes through to its file; nothing is buffered.
        Ok(())
    }
}

/// In-memory storage backend for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries().remove(key);
        Ok(())
    }

    fn flush(&self) -> AppResult<()> {
        Ok(())
    }
}
