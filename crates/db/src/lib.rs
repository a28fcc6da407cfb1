//! Persistence layer for pollbox.
//!
//! State lives in a process-local key-value store of JSON strings. Each
//! collection is kept whole under a fixed key; every mutation re-reads
//! the collection, transforms it in memory and rewrites it back. The
//! store is opened once at process start and flushed at shutdown.

pub mod entities;
pub mod repositories;
pub mod storage;
pub mod test_utils;

use std::sync::Arc;

use pollbox_common::{AppResult, Config};
use storage::{LocalStorage, StorageBackend};

/// Open the persistent store described by the configuration.
pub fn open(config: &Config) -> AppResult<Arc<dyn StorageBackend>> {
    let store = LocalStorage::open(&config.storage.data_dir)?;
    Ok(Arc::new(store))
}
