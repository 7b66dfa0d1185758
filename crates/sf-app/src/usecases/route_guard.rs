use std::sync::Arc;

use tracing::debug;

use sf_core::{GuardDecision, Route};

use super::session::SessionStore;

/// Use case for checking whether a route may be entered.
///
/// The success view requires a completed signup; anything else redirects
/// back to the signup form.
pub struct RouteGuard {
    store: Arc<SessionStore>,
}

impl RouteGuard {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    pub fn check(&self, route: Route) -> GuardDecision {
        if !route.requires_auth() {
            return GuardDecision::Allow;
        }
        if self.store.is_signed_up() && self.store.is_authenticated() {
            GuardDecision::Allow
        } else {
            debug!(route = route.path(), "route requires signup, redirecting");
            GuardDecision::Redirect(Route::Signup)
        }
    }

    /// Guard by path. Unknown paths redirect to the signup form.
    pub fn check_path(&self, path: &str) -> GuardDecision {
        match Route::from_path(path) {
            Some(route) => self.check(route),
            None => GuardDecision::Redirect(Route::Signup),
        }
    }
}
