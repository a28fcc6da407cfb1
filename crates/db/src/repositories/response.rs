//! Response repository.

use std::sync::Arc;

use pollbox_common::AppResult;

use crate::entities::Response;
use crate::repositories::collection;
use crate::storage::StorageBackend;

/// Response repository over the persistent store.
#[derive(Clone)]
pub struct ResponseRepository {
    store: Arc<dyn StorageBackend>,
    key: String,
}

impl ResponseRepository {
    /// Create a new response repository.
    #[must_use]
    pub fn new(store: Arc<dyn StorageBackend>, namespace: &str) -> Self {
        Self {
            store,
            key: format!("{namespace}_responses"),
        }
    }

    /// All responses, in storage order.
    pub fn all(&self) -> AppResult<Vec<Response>> {
        collection::read(self.store.as_ref(), &self.key)
    }

    /// Rewrite the whole response collection.
    pub fn save_all(&self, responses: &[Response]) -> AppResult<()> {
        collection::write(self.store.as_ref(), &self.key, responses)
    }

    /// Append a response unconditionally.
    ///
    /// No uniqueness check on (`poll_id`, `roll_number`) happens here.
    pub fn append(&self, response: Response) -> AppResult<Response> {
        let mut responses = self.all()?;
        responses.push(response.clone());
        self.save_all(&responses)?;
        Ok(response)
    }

    /// All responses for a poll, in storage order.
    pub fn find_by_poll(&self, poll_id: &str) -> AppResult<Vec<Response>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|r| r.poll_id == poll_id)
            .collect())
    }

    /// Whether any stored response matches the (`poll_id`, `roll_number`) pair.
    pub fn has_responded(&self, poll_id: &str, roll_number: &str) -> AppResult<bool> {
        Ok(self
            .all()?
            .iter()
            .any(|r| r.poll_id == poll_id && r.roll_number == roll_number))
    }

    /// Remove every response referencing `poll_id`.
    pub fn delete_by_poll(&self, poll_id: &str) -> AppResult<()> {
        let responses: Vec<Response> = self
            .all()?
            .into_iter()
            .filter(|r| r.poll_id != poll_id)
            .collect();
        self.save_all(&responses)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Utc;

    fn repo() -> ResponseRepository {
        ResponseRepository::new(Arc::new(MemoryStorage::new()), "pollApp")
    }

    fn response(poll_id: &str, roll: &str) -> Response {
        Response {
            poll_id: poll_id.to_string(),
            roll_number: roll.to_string(),
            option: "Morning".to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn append_is_unconditional() {
        let repo = repo();
        repo.append(response("p1", "1")).unwrap();
        repo.append(response("p1", "1")).unwrap();

        // Two records for the same pair; dedup is the caller's problem.
        assert_eq!(repo.find_by_poll("p1").unwrap().len(), 2);
    }

    #[test]
    fn has_responded_matches_exact_pair() {
        let repo = repo();
        repo.append(response("p1", "1")).unwrap();

        assert!(repo.has_responded("p1", "1").unwrap());
        assert!(!repo.has_responded("p1", "2").unwrap());
        assert!(!repo.has_responded("p2", "1").unwrap());
    }

    #[test]
    fn delete_by_poll_leaves_other_polls_alone() {
        let repo = repo();
        repo.append(response("p1", "1")).unwrap();
        repo.append(response("p1", "2")).unwrap();
        repo.append(response("p2", "1")).unwrap();

        repo.delete_by_poll("p1").unwrap();
        assert!(repo.find_by_poll("p1").unwrap().is_empty());
        assert_eq!(repo.find_by_poll("p2").unwrap().len(), 1);
    }
}
