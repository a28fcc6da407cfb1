//! Session repository.
//!
//! The active session is one persisted `User` record under its own key;
//! its presence is what "logged in" means across restarts.

use std::sync::Arc;

use pollbox_common::{AppError, AppResult};
use tracing::warn;

use crate::entities::User;
use crate::storage::StorageBackend;

/// Session repository over the persistent store.
#[derive(Clone)]
pub struct SessionRepository {
    store: Arc<dyn StorageBackend>,
    key: String,
}

impl SessionRepository {
    /// Create a new session repository.
    #[must_use]
    pub fn new(store: Arc<dyn StorageBackend>, namespace: &str) -> Self {
        Self {
            store,
            key: format!("{namespace}_currentUser"),
        }
    }

    /// The persisted session record, if a valid one exists.
    ///
    /// A record that fails to parse is removed and reads as logged out.
    pub fn current(&self) -> AppResult<Option<User>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                warn!(%error, "discarding unparseable session record");
                self.store.remove(&self.key)?;
                Ok(None)
            }
        }
    }

    /// Persist `user` as the active session.
    pub fn set(&self, user: &User) -> AppResult<()> {
        let raw =
            serde_json::to_string(user).map_err(|e| AppError::Serialization(e.to_string()))?;
        self.store.set(&self.key, &raw)
    }

    /// Forget the active session.
    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn user() -> User {
        User {
            roll_number: "7".to_string(),
            name: "Student".to_string(),
            email: "student7@college.edu".to_string(),
            password: "pass7123".to_string(),
            is_admin: false,
            has_completed_setup: true,
        }
    }

    #[test]
    fn set_then_current_round_trips() {
        let repo = SessionRepository::new(Arc::new(MemoryStorage::new()), "pollApp");
        assert!(repo.current().unwrap().is_none());

        repo.set(&user()).unwrap();
        assert_eq!(repo.current().unwrap(), Some(user()));

        repo.clear().unwrap();
        assert!(repo.current().unwrap().is_none());
    }

    #[test]
    fn corrupt_session_record_is_discarded() {
        let store = Arc::new(MemoryStorage::new());
        store.set("pollApp_currentUser", "{oops").unwrap();
        let repo = SessionRepository::new(Arc::clone(&store) as Arc<dyn StorageBackend>, "pollApp");

        assert!(repo.current().unwrap().is_none());
        // The broken record was removed, not just ignored.
        assert!(store.get("pollApp_currentUser").unwrap().is_none());
    }
}
