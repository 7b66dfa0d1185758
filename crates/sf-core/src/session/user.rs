use serde::{Deserialize, Serialize};

use crate::signup::ValidatedSignup;

/// User record kept after a successful signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub email: String,
    pub accept_updates: bool,
}

impl From<&ValidatedSignup> for SessionUser {
    fn from(signup: &ValidatedSignup) -> Self {
        Self {
            email: signup.email().to_string(),
            accept_updates: signup.accept_updates(),
        }
    }
}
