//! Form controller.
//!
//! Holds the local input buffer and presentation flags, and bridges them to
//! the [`SessionStore`]. Field errors shown next to inputs are read from the
//! store; edits after a failed submit clear them after a short grace delay.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info_span, warn, Instrument};

use sf_core::ports::{DeferredTask, TimerPort};
use sf_core::{SignupField, SignupInput};

use crate::usecases::session::SessionStore;

pub const PASSWORD_MASK_CHAR: char = '•';

pub struct SignupFormController {
    store: Arc<SessionStore>,
    timer: Arc<dyn TimerPort>,
    error_clear_delay: Duration,

    form: SignupInput,
    show_password: bool,
    has_attempted_submit: bool,
}

impl SignupFormController {
    pub fn new(
        store: Arc<SessionStore>,
        timer: Arc<dyn TimerPort>,
        error_clear_delay: Duration,
    ) -> Self {
        Self {
            store,
            timer,
            error_clear_delay,
            form: SignupInput::default(),
            show_password: false,
            has_attempted_submit: false,
        }
    }

    // === State ===

    pub fn form(&self) -> &SignupInput {
        &self.form
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn has_attempted_submit(&self) -> bool {
        self.has_attempted_submit
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn has_errors(&self) -> bool {
        self.store.has_errors()
    }

    /// UI pre-flight gate. Schema validation still runs on submit.
    pub fn can_submit(&self) -> bool {
        !self.form.email.trim().is_empty()
            && !self.form.password.trim().is_empty()
            && !self.is_loading()
    }

    /// First store message for `field`.
    pub fn field_error(&self, field: SignupField) -> Option<String> {
        self.store.field_errors(field).into_iter().next()
    }

    pub fn is_field_valid(&self, field: SignupField) -> bool {
        !self.has_attempted_submit || self.field_error(field).is_none()
    }

    /// Password as it should be rendered: plain when visible, masked otherwise.
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.form.password.clone()
        } else {
            self.form
                .password
                .chars()
                .map(|_| PASSWORD_MASK_CHAR)
                .collect()
        }
    }

    // === Actions ===

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub async fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
        self.handle_field_input(SignupField::Email).await;
    }

    pub async fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        self.handle_field_input(SignupField::Password).await;
    }

    pub async fn set_accept_updates(&mut self, accept_updates: bool) {
        self.form.accept_updates = accept_updates;
        self.handle_field_input(SignupField::AcceptUpdates).await;
    }

    /// React to an edit of `field`.
    ///
    /// After a failed submit, a field that still shows an error gets it
    /// cleared once `error_clear_delay` passes without another edit to the
    /// same field.
    pub async fn handle_field_input(&self, field: SignupField) {
        if !self.has_attempted_submit || self.field_error(field).is_none() {
            return;
        }

        let store = Arc::clone(&self.store);
        let task: DeferredTask = Box::pin(async move {
            store.clear_field_error(field);
        });

        let key = clear_task_key(field);
        match self.timer.schedule(&key, self.error_clear_delay, task).await {
            Ok(()) => debug!(field = %field, "field error clear scheduled"),
            Err(err) => {
                warn!(field = %field, error = %err, "failed to schedule field error clear, clearing now");
                self.store.clear_field_error(field);
            }
        }
    }

    pub fn clear_field_error(&self, field: SignupField) {
        self.store.clear_field_error(field);
    }

    /// Submit the buffered input. Returns whether signup succeeded.
    pub async fn submit_form(&mut self) -> bool {
        let span = info_span!("usecase.signup_form.submit");
        async {
            self.has_attempted_submit = true;
            // Clears armed before this submit must not wipe its fresh errors.
            self.cancel_pending_clears().await;

            let outcome = self.store.sign_up(&self.form).await;
            debug!(success = outcome.success, "signup form submitted");
            outcome.success
        }
        .instrument(span)
        .await
    }

    pub async fn reset_form(&mut self) {
        self.form = SignupInput::default();
        self.show_password = false;
        self.has_attempted_submit = false;
        self.cancel_pending_clears().await;
        self.store.clear_errors();
    }

    /// Cancel this form's pending clears. The timer is shared, so other
    /// keys are left alone.
    async fn cancel_pending_clears(&self) {
        for field in SignupField::ALL {
            if let Err(err) = self.timer.cancel(&clear_task_key(field)).await {
                warn!(field = %field, error = %err, "failed to cancel pending field error clear");
            }
        }
    }
}

fn clear_task_key(field: SignupField) -> String {
    format!("clear-field-error:{field}")
}
