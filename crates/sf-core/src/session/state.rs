use serde::{Deserialize, Serialize};

use super::token::SessionToken;
use super::user::SessionUser;
use crate::signup::FieldErrors;

/// Durable session record.
///
/// Invariant: `signed_up` implies `user.is_some()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub token: Option<SessionToken>,
    pub signed_up: bool,
}

impl SessionState {
    pub fn signed_up(user: SessionUser, token: SessionToken) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            signed_up: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_consistent(&self) -> bool {
        !self.signed_up || self.user.is_some()
    }
}

/// Full observable store state: durable session plus transient flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub session: SessionState,
    pub is_loading: bool,
    pub errors: FieldErrors,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
