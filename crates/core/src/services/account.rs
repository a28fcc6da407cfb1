//! Account maintenance: password changes and first-login setup.

use pollbox_common::AppResult;
use pollbox_db::entities::User;
use pollbox_db::repositories::{SessionRepository, UserRepository};
use serde::Deserialize;
use validator::Validate;

/// Input for changing a password.
///
/// Validation belongs to the presentation layer; callers run
/// [`Validate::validate`] before handing the input over.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordInput {
    pub roll_number: String,

    pub current_password: String,

    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}

/// Input for completing first-login setup.
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteSetupInput {
    pub roll_number: String,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}

/// Account service for password and profile updates.
#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
    sessions: SessionRepository,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(users: UserRepository, sessions: SessionRepository) -> Self {
        Self { users, sessions }
    }

    /// Overwrite the password of the user matching the (roll number,
    /// current password) pair.
    ///
    /// Returns false when the pair matches no stored user; a wrong
    /// current password and an unknown roll number are reported the
    /// same way.
    pub fn change_password(&self, input: &ChangePasswordInput) -> AppResult<bool> {
        self.users.update_password(
            &input.roll_number,
            &input.current_password,
            &input.new_password,
        )
    }

    /// Set the display name and password for a roll number and mark
    /// setup complete.
    ///
    /// The current password is not checked. When the roll number is the
    /// active session, the session record is rewritten with the updated
    /// user so the change shows without re-authentication.
    pub fn complete_setup(&self, input: &CompleteSetupInput) -> AppResult<Option<User>> {
        let Some(updated) =
            self.users
                .complete_setup(&input.roll_number, &input.name, &input.new_password)?
        else {
            return Ok(None);
        };

        if let Some(session) = self.sessions.current()?
            && session.roll_number == updated.roll_number
        {
            self.sessions.set(&updated)?;
        }

        Ok(Some(updated))
    }
}
