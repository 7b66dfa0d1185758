//! Session store.
//!
//! Owns the session state: durable user/token/signed-up record plus the
//! transient loading flag and field error map. All mutations go through
//! [`SessionStore::mutate`], which publishes a snapshot to subscribers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

use sf_core::ports::{ClockPort, KeyValueStoragePort, SignupApiPort};
use sf_core::signup::schema;
use sf_core::{
    ErrorKey, FieldErrors, SessionSnapshot, SessionState, SessionToken, SessionUser, SignupField,
    SignupInput, TokenClaims,
};

use super::loading_guard::LoadingGuard;
use super::persistence::SessionPersistence;

/// Message stored under the `general` key when signup fails for a reason
/// other than validation.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Result of a signup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignupOutcome {
    pub success: bool,
}

impl SignupOutcome {
    pub fn succeeded() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

pub struct SessionStore {
    state: Mutex<SessionSnapshot>,
    /// Bumped by every signup attempt and every reset. An in-flight attempt
    /// only commits while it still holds the latest number.
    latest_attempt: AtomicU64,
    changes: watch::Sender<SessionSnapshot>,
    persistence: SessionPersistence,
    signup_api: Arc<dyn SignupApiPort>,
    clock: Arc<dyn ClockPort>,
}

impl SessionStore {
    pub fn new(
        storage: Arc<dyn KeyValueStoragePort>,
        signup_api: Arc<dyn SignupApiPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let (changes, _) = watch::channel(SessionSnapshot::default());
        Self {
            state: Mutex::new(SessionSnapshot::default()),
            latest_attempt: AtomicU64::new(0),
            changes,
            persistence: SessionPersistence::new(storage),
            signup_api,
            clock,
        }
    }

    /// Hydrate the durable session from storage.
    pub async fn restore(&self) -> anyhow::Result<()> {
        let session = self
            .persistence
            .load()
            .await
            .context("load persisted session failed")?;
        self.mutate(|state| state.session = session);
        Ok(())
    }

    /// Validate `input`, call the signup api and commit the session.
    ///
    /// Never fails: validation errors land in the field error map, anything
    /// else becomes a single `general` entry.
    pub async fn sign_up(&self, input: &SignupInput) -> SignupOutcome {
        let loading = LoadingGuard::acquire(self);
        let attempt = loading.attempt();

        let span = info_span!("usecase.session_store.sign_up", attempt);
        async {
            match self.run_signup(attempt, input).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(error = %format!("{err:#}"), "signup failed unexpectedly");
                    self.apply_if_current(attempt, |state| {
                        state.errors = FieldErrors::general(GENERIC_ERROR_MESSAGE);
                    });
                    SignupOutcome::failed()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_signup(&self, attempt: u64, input: &SignupInput) -> anyhow::Result<SignupOutcome> {
        let signup = match schema::validate(input) {
            Ok(signup) => signup,
            Err(errors) => {
                let fields: Vec<&str> = errors.keys().map(|key| key.as_str()).collect();
                info!(fields = %fields.join(","), "signup rejected by validation");
                self.apply_if_current(attempt, |state| state.errors = errors);
                return Ok(SignupOutcome::failed());
            }
        };

        self.signup_api
            .register(&signup)
            .await
            .context("signup api call failed")?;

        if !self.is_current(attempt) {
            warn!("signup superseded while in flight, discarding result");
            return Ok(SignupOutcome::failed());
        }

        let claims = TokenClaims::issue(signup.email(), self.clock.now_secs());
        let token = SessionToken::issue(&claims).context("synthesize session token failed")?;
        let session = SessionState::signed_up(SessionUser::from(&signup), token);

        if let Err(err) = self.persistence.save(&session).await {
            self.resync_persistence().await;
            return Err(err).context("persist session failed");
        }

        if !self.apply_if_current(attempt, |state| state.session = session) {
            warn!("signup superseded while persisting, restoring persisted session");
            self.resync_persistence().await;
            return Ok(SignupOutcome::failed());
        }

        info!(
            accept_updates = signup.accept_updates(),
            expires_at = claims.exp,
            "signup completed"
        );
        Ok(SignupOutcome::succeeded())
    }

    /// Clear user, token, signed-up flag and errors, in memory and on disk.
    ///
    /// Also invalidates any signup still in flight.
    pub async fn reset_signup(&self) {
        self.mutate(|state| {
            self.latest_attempt.fetch_add(1, Ordering::SeqCst);
            *state = SessionSnapshot::default();
        });

        if let Err(err) = self.persistence.clear().await {
            error!(error = %err, "failed to clear persisted session");
        }
        info!("signup state reset");
    }

    // === Derived state ===

    pub fn is_authenticated(&self) -> bool {
        self.read(|state| state.is_authenticated())
    }

    pub fn is_signed_up(&self) -> bool {
        self.read(|state| state.session.signed_up)
    }

    pub fn is_loading(&self) -> bool {
        self.read(|state| state.is_loading)
    }

    pub fn has_errors(&self) -> bool {
        self.read(|state| state.has_errors())
    }

    pub fn field_errors(&self, field: SignupField) -> Vec<String> {
        self.read(|state| state.errors.get(field).to_vec())
    }

    pub fn general_errors(&self) -> Vec<String> {
        self.read(|state| state.errors.get(ErrorKey::General).to_vec())
    }

    pub fn errors(&self) -> FieldErrors {
        self.read(|state| state.errors.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.read(|state| state.session.user.clone())
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.read(|state| state.session.token.clone())
    }

    /// Decoded claims of the current token, `None` when signed out or the
    /// token cannot be decoded.
    pub fn token_claims(&self) -> Option<TokenClaims> {
        let token = self.token()?;
        match token.claims() {
            Ok(claims) => Some(claims),
            Err(err) => {
                warn!(error = %err, "session token could not be decoded");
                None
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.read(|state| state.clone())
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.changes.subscribe()
    }

    // === Error map ===

    pub fn set_errors(&self, errors: FieldErrors) {
        self.mutate(|state| state.errors = errors);
    }

    pub fn clear_errors(&self) {
        self.mutate(|state| state.errors.clear());
    }

    /// Remove one field's errors. Returns whether anything was removed.
    pub fn clear_field_error(&self, field: SignupField) -> bool {
        let removed = self.mutate(|state| state.errors.remove(field).is_some());
        if removed {
            debug!(field = %field, "field error cleared");
        }
        removed
    }

    // === Attempt bookkeeping ===

    pub(super) fn begin_attempt(&self) -> u64 {
        self.mutate(|state| {
            state.is_loading = true;
            state.errors.clear();
            self.latest_attempt.fetch_add(1, Ordering::SeqCst) + 1
        })
    }

    pub(super) fn finish_attempt(&self, attempt: u64) {
        self.apply_if_current(attempt, |state| state.is_loading = false);
    }

    fn is_current(&self, attempt: u64) -> bool {
        self.latest_attempt.load(Ordering::SeqCst) == attempt
    }

    /// Apply `f` only while `attempt` is still the latest. The check and the
    /// write happen under the state lock, so a concurrent reset cannot slip
    /// in between.
    fn apply_if_current(&self, attempt: u64, f: impl FnOnce(&mut SessionSnapshot)) -> bool {
        self.mutate(|state| {
            if !self.is_current(attempt) {
                return false;
            }
            f(state);
            true
        })
    }

    async fn resync_persistence(&self) {
        let session = self.read(|state| state.session.clone());
        if let Err(err) = self.persistence.save(&session).await {
            error!(error = %err, "failed to restore persisted session");
        }
    }

    // === State access ===

    fn read<R>(&self, f: impl FnOnce(&SessionSnapshot) -> R) -> R {
        let state = self.lock_state();
        f(&*state)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut SessionSnapshot) -> R) -> R {
        let mut state = self.lock_state();
        let result = f(&mut *state);
        let snapshot = state.clone();
        self.changes.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
        result
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(|poisoned| {
            error!("session state mutex poisoned, recovering from poisoned state");
            poisoned.into_inner()
        })
    }
}
