//! Test utilities for the persistence layer.
//!
//! Provides an in-memory store with ready-made repository accessors so
//! service tests never touch the filesystem.

use std::sync::Arc;

use crate::repositories::{PollRepository, ResponseRepository, SessionRepository, UserRepository};
use crate::storage::{MemoryStorage, StorageBackend};

/// Namespace used by test stores.
pub const TEST_NAMESPACE: &str = "pollApp";

/// An in-memory store plus repository accessors for tests.
pub struct TestStore {
    store: Arc<dyn StorageBackend>,
}

impl TestStore {
    /// Create an empty test store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStorage::new()),
        }
    }

    /// The raw storage backend.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn StorageBackend> {
        Arc::clone(&self.store)
    }

    /// A user repository bound to this store.
    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.backend(), TEST_NAMESPACE)
    }

    /// A poll repository bound to this store.
    #[must_use]
    pub fn polls(&self) -> PollRepository {
        PollRepository::new(self.backend(), TEST_NAMESPACE)
    }

    /// A response repository bound to this store.
    #[must_use]
    pub fn responses(&self) -> ResponseRepository {
        ResponseRepository::new(self.backend(), TEST_NAMESPACE)
    }

    /// A session repository bound to this store.
    #[must_use]
    pub fn sessions(&self) -> SessionRepository {
        SessionRepository::new(self.backend(), TEST_NAMESPACE)
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}
