//! Poll repository.

use std::sync::Arc;

use pollbox_common::AppResult;

use crate::entities::Poll;
use crate::repositories::collection;
use crate::storage::StorageBackend;

/// Poll repository over the persistent store.
#[derive(Clone)]
pub struct PollRepository {
    store: Arc<dyn StorageBackend>,
    key: String,
}

impl PollRepository {
    /// Create a new poll repository.
    #[must_use]
    pub fn new(store: Arc<dyn StorageBackend>, namespace: &str) -> Self {
        Self {
            store,
            key: format!("{namespace}_polls"),
        }
    }

    /// All polls, in insertion order.
    pub fn all(&self) -> AppResult<Vec<Poll>> {
        collection::read(self.store.as_ref(), &self.key)
    }

    /// Rewrite the whole poll collection.
    pub fn save_all(&self, polls: &[Poll]) -> AppResult<()> {
        collection::write(self.store.as_ref(), &self.key, polls)
    }

    /// Find a poll by ID.
    pub fn find_by_id(&self, poll_id: &str) -> AppResult<Option<Poll>> {
        Ok(self.all()?.into_iter().find(|p| p.id == poll_id))
    }

    /// Append a poll to the collection and return the stored record.
    pub fn append(&self, poll: Poll) -> AppResult<Poll> {
        let mut polls = self.all()?;
        polls.push(poll.clone());
        self.save_all(&polls)?;
        Ok(poll)
    }

    /// Remove the poll with the given ID.
    ///
    /// Removing an unknown ID rewrites the collection unchanged.
    pub fn delete(&self, poll_id: &str) -> AppResult<()> {
        let polls: Vec<Poll> = self
            .all()?
            .into_iter()
            .filter(|p| p.id != poll_id)
            .collect();
        self.save_all(&polls)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Utc;

    fn poll(id: &str) -> Poll {
        Poll {
            id: id.to_string(),
            question: "Which lecture slot works best?".to_string(),
            options: vec!["Morning".to_string(), "Afternoon".to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn append_preserves_insertion_order() {
        let repo = PollRepository::new(Arc::new(MemoryStorage::new()), "pollApp");
        repo.append(poll("a")).unwrap();
        repo.append(poll("b")).unwrap();
        repo.append(poll("c")).unwrap();

        let ids: Vec<String> = repo.all().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn delete_removes_only_the_named_poll() {
        let repo = PollRepository::new(Arc::new(MemoryStorage::new()), "pollApp");
        repo.append(poll("a")).unwrap();
        repo.append(poll("b")).unwrap();

        repo.delete("a").unwrap();
        assert!(repo.find_by_id("a").unwrap().is_none());
        assert!(repo.find_by_id("b").unwrap().is_some());

        // Unknown IDs are a no-op.
        repo.delete("zzz").unwrap();
        assert_eq!(repo.all().unwrap().len(), 1);
    }
}
