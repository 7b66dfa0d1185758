//! Application root.
//!
//! Owns the single [`SessionStore`] and hands out the use cases that read or
//! drive it. Construct once at startup and share.

use std::sync::Arc;
use std::time::Duration;

use sf_core::ports::TimerPort;
use tracing::info;

use crate::deps::SignupDeps;
use crate::usecases::{RouteGuard, SessionStore, SignupFormController};

pub struct SignupApp {
    store: Arc<SessionStore>,
    timer: Arc<dyn TimerPort>,
    error_clear_delay: Duration,
}

impl SignupApp {
    pub fn new(deps: SignupDeps, error_clear_delay: Duration) -> Self {
        let store = Arc::new(SessionStore::new(deps.storage, deps.signup_api, deps.clock));
        Self {
            store,
            timer: deps.timer,
            error_clear_delay,
        }
    }

    /// Build the app and hydrate the persisted session.
    pub async fn start(deps: SignupDeps, error_clear_delay: Duration) -> anyhow::Result<Self> {
        let app = Self::new(deps, error_clear_delay);
        app.store.restore().await?;
        info!(
            authenticated = app.store.is_authenticated(),
            "signup app started"
        );
        Ok(app)
    }

    pub fn session_store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    pub fn signup_form(&self) -> SignupFormController {
        SignupFormController::new(
            Arc::clone(&self.store),
            Arc::clone(&self.timer),
            self.error_clear_delay,
        )
    }

    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new(Arc::clone(&self.store))
    }
}
