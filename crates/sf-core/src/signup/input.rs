use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw signup input as typed by the user.
///
/// Created fresh per submission attempt and never persisted.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub accept_updates: bool,
}

impl SignupInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>, accept_updates: bool) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            accept_updates,
        }
    }
}

/// Signup input that passed the schema.
///
/// Only [`crate::signup::validate`] can build one, so holding a value is proof
/// that every rule was checked.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedSignup {
    email: String,
    password: String,
    accept_updates: bool,
}

impl ValidatedSignup {
    pub(crate) fn new(email: String, password: String, accept_updates: bool) -> Self {
        Self {
            email,
            password,
            accept_updates,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn accept_updates(&self) -> bool {
        self.accept_updates
    }
}

// Passwords never reach logs through `{:?}`.
impl fmt::Debug for SignupInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupInput")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("accept_updates", &self.accept_updates)
            .finish()
    }
}

impl fmt::Debug for ValidatedSignup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedSignup")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("accept_updates", &self.accept_updates)
            .finish()
    }
}
