//! Application routes and guard decisions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Signup form.
    Signup,
    /// Success view, only reachable with a completed signup.
    Success,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Signup => "/",
            Route::Success => "/success",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Signup),
            "/success" => Some(Route::Success),
            _ => None,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Success)
    }
}

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [Route::Signup, Route::Success] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn only_success_requires_auth() {
        assert!(Route::Success.requires_auth());
        assert!(!Route::Signup.requires_auth());
    }
}
