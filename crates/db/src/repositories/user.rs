//! User repository.

use std::sync::Arc;

use pollbox_common::AppResult;

use crate::entities::User;
use crate::repositories::collection;
use crate::storage::StorageBackend;

/// User repository over the persistent store.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn StorageBackend>,
    key: String,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub fn new(store: Arc<dyn StorageBackend>, namespace: &str) -> Self {
        Self {
            store,
            key: format!("{namespace}_users"),
        }
    }

    /// Whether the user collection has ever been written.
    pub fn exists(&self) -> AppResult<bool> {
        Ok(self.store.get(&self.key)?.is_some())
    }

    /// All users, in seeded order.
    pub fn all(&self) -> AppResult<Vec<User>> {
        collection::read(self.store.as_ref(), &self.key)
    }

    /// Rewrite the whole user collection.
    pub fn save_all(&self, users: &[User]) -> AppResult<()> {
        collection::write(self.store.as_ref(), &self.key, users)
    }

    /// Find a user by roll number.
    pub fn find_by_roll_number(&self, roll_number: &str) -> AppResult<Option<User>> {
        Ok(self
            .all()?
            .into_iter()
            .find(|u| u.roll_number == roll_number))
    }

    /// First user matching `identifier` (roll-number or email form)
    /// whose stored password equals `password` exactly.
    ///
    /// Case-sensitive, no hashing. Unknown identifiers and wrong
    /// passwords both read as `None`.
    pub fn find_by_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        Ok(self
            .all()?
            .into_iter()
            .find(|u| u.matches_identifier(identifier) && u.password == password))
    }

    /// Overwrite the password of the user matching the
    /// (`roll_number`, `current_password`) pair.
    ///
    /// Returns false when no user matches the pair.
    pub fn update_password(
        &self,
        roll_number: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<bool> {
        let mut users = self.all()?;
        let Some(user) = users
            .iter_mut()
            .find(|u| u.roll_number == roll_number && u.password == current_password)
        else {
            return Ok(false);
        };
        user.password = new_password.to_string();
        self.save_all(&users)?;
        Ok(true)
    }

    /// Set the display name and password for `roll_number` and mark
    /// setup complete.
    ///
    /// Returns the updated record, or `None` when the roll number is
    /// unknown. The current password is deliberately not checked.
    pub fn complete_setup(
        &self,
        roll_number: &str,
        name: &str,
        new_password: &str,
    ) -> AppResult<Option<User>> {
        let mut users = self.all()?;
        let Some(user) = users.iter_mut().find(|u| u.roll_number == roll_number) else {
            return Ok(None);
        };
        user.name = name.to_string();
        user.password = new_password.to_string();
        user.has_completed_setup = true;
        let updated = user.clone();
        self.save_all(&users)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn repo() -> UserRepository {
        UserRepository::new(Arc::new(MemoryStorage::new()), "pollApp")
    }

    fn student(roll: &str) -> User {
        User {
            roll_number: roll.to_string(),
            name: format!("Student {roll}"),
            email: format!("student{roll}@college.edu"),
            password: format!("pass{roll}123"),
            is_admin: false,
            has_completed_setup: false,
        }
    }

    #[test]
    fn absent_collection_reads_empty() {
        let repo = repo();
        assert!(!repo.exists().unwrap());
        assert!(repo.all().unwrap().is_empty());
    }

    #[test]
    fn malformed_collection_reads_empty() {
        let store = Arc::new(MemoryStorage::new());
        store.set("pollApp_users", "{not json").unwrap();
        let repo = UserRepository::new(store, "pollApp");

        assert!(repo.exists().unwrap());
        assert!(repo.all().unwrap().is_empty());
    }

    #[test]
    fn update_password_requires_matching_pair() {
        let repo = repo();
        repo.save_all(&[student("1")]).unwrap();

        assert!(!repo.update_password("1", "wrong", "newpass").unwrap());
        assert!(!repo.update_password("2", "pass2123", "newpass").unwrap());
        assert!(repo.update_password("1", "pass1123", "newpass").unwrap());

        let stored = repo.find_by_roll_number("1").unwrap().unwrap();
        assert_eq!(stored.password, "newpass");
    }

    #[test]
    fn complete_setup_ignores_current_password() {
        let repo = repo();
        repo.save_all(&[student("1")]).unwrap();

        let updated = repo
            .complete_setup("1", "Asha Nair", "secret99")
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Asha Nair");
        assert_eq!(updated.password, "secret99");
        assert!(updated.has_completed_setup);

        assert!(repo.complete_setup("99", "Nobody", "x").unwrap().is_none());
    }
}
