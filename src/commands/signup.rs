use std::io::Write;

use anyhow::bail;
use sf_app::SignupApp;
use sf_core::{ErrorKey, SignupField};
use tracing::{info_span, Instrument};

/// Fill the form, submit it and print either the new session or the errors.
pub async fn run_signup(
    app: &SignupApp,
    out: &mut impl Write,
    email: String,
    password: String,
    accept_updates: bool,
) -> anyhow::Result<()> {
    let span = info_span!("command.signup");
    submit(app, out, email, password, accept_updates)
        .instrument(span)
        .await
}

async fn submit(
    app: &SignupApp,
    out: &mut impl Write,
    email: String,
    password: String,
    accept_updates: bool,
) -> anyhow::Result<()> {
    let mut form = app.signup_form();
    form.set_email(email).await;
    form.set_password(password).await;
    form.set_accept_updates(accept_updates).await;

    if !form.can_submit() {
        bail!("email and password are required");
    }

    let store = app.session_store();
    if form.submit_form().await {
        let email = store.user().map(|user| user.email).unwrap_or_default();
        writeln!(out, "Signed up as {email}")?;
        if let Some(claims) = store.token_claims() {
            writeln!(out, "Session expires {}", super::format_epoch_secs(claims.exp))?;
        }
        return Ok(());
    }

    let errors = store.errors();
    for field in SignupField::ALL {
        for message in errors.get(field) {
            writeln!(out, "{field}: {message}")?;
        }
    }
    for message in errors.get(ErrorKey::General) {
        writeln!(out, "{message}")?;
    }
    bail!("signup was not completed")
}
