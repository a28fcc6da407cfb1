//! User entity.

use serde::{Deserialize, Serialize};

/// A user account.
///
/// `roll_number` is the unique identity key; the single administrator
/// uses `"tutor"`. Passwords are stored and compared in plain text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub roll_number: String,

    /// Display name; a seeded placeholder until first-login setup.
    pub name: String,

    /// Derived deterministically from the roll number for students.
    pub email: String,

    pub password: String,

    /// Exactly one user has this set.
    pub is_admin: bool,

    /// False until the student finishes first-login setup. Stored
    /// records may omit the field entirely.
    #[serde(default)]
    pub has_completed_setup: bool,
}

impl User {
    /// Whether `identifier` names this account, in either the
    /// roll-number or the email form.
    #[must_use]
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.roll_number == identifier || self.email == identifier
    }
}
