//! Session service.

use pollbox_common::AppResult;
use pollbox_db::entities::User;
use pollbox_db::repositories::{SessionRepository, UserRepository};
use tracing::debug;

/// Authentication and the persisted current-user record.
#[derive(Clone)]
pub struct SessionService {
    users: UserRepository,
    sessions: SessionRepository,
}

impl SessionService {
    /// Create a new session service.
    #[must_use]
    pub const fn new(users: UserRepository, sessions: SessionRepository) -> Self {
        Self { users, sessions }
    }

    /// Authenticate by identifier (roll-number or email form) and password.
    ///
    /// Returns the first matching user. `None` is the sole failure
    /// signal; an unknown identifier and a wrong password are
    /// indistinguishable.
    pub fn authenticate(&self, identifier: &str, password: &str) -> AppResult<Option<User>> {
        self.users.find_by_credentials(identifier, password)
    }

    /// Authenticate and, on success, persist the session record.
    pub fn login(&self, identifier: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.authenticate(identifier, password)? else {
            debug!(identifier, "login rejected");
            return Ok(None);
        };
        self.sessions.set(&user)?;
        Ok(Some(user))
    }

    /// Forget the active session.
    pub fn logout(&self) -> AppResult<()> {
        self.sessions.clear()
    }

    /// The logged-in user, restored from the persisted session record.
    pub fn current(&self) -> AppResult<Option<User>> {
        self.sessions.current()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::SeedService;
    use pollbox_db::test_utils::TestStore;

    fn service(store: &TestStore) -> SessionService {
        SeedService::new(store.users(), store.polls(), store.responses())
            .seed()
            .unwrap();
        SessionService::new(store.users(), store.sessions())
    }

    #[test]
    fn every_seeded_user_authenticates_both_ways() {
        let store = TestStore::new();
        let sessions = service(&store);

        for user in store.users().all().unwrap() {
            let by_roll = sessions
                .authenticate(&user.roll_number, &user.password)
                .unwrap();
            assert_eq!(by_roll.as_ref(), Some(&user));

            let by_email = sessions.authenticate(&user.email, &user.password).unwrap();
            assert_eq!(by_email.as_ref(), Some(&user));
        }
    }

    #[test]
    fn mismatches_collapse_to_none() {
        let store = TestStore::new();
        let sessions = service(&store);

        assert!(sessions.authenticate("1", "wrong").unwrap().is_none());
        assert!(sessions.authenticate("999", "pass1123").unwrap().is_none());
        // Case-sensitive comparison, no normalization.
        assert!(sessions.authenticate("1", "PASS1123").unwrap().is_none());
        assert!(sessions.authenticate("TUTOR", "admin123").unwrap().is_none());
    }

    #[test]
    fn login_persists_the_session() {
        let store = TestStore::new();
        let sessions = service(&store);

        assert!(sessions.current().unwrap().is_none());
        let user = sessions.login("tutor", "admin123").unwrap().unwrap();
        assert_eq!(sessions.current().unwrap(), Some(user));

        sessions.logout().unwrap();
        assert!(sessions.current().unwrap().is_none());
    }

    #[test]
    fn failed_login_leaves_no_session() {
        let store = TestStore::new();
        let sessions = service(&store);

        assert!(sessions.login("tutor", "nope").unwrap().is_none());
        assert!(sessions.current().unwrap().is_none());
    }
}
