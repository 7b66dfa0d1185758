use std::io::Write;

use sf_app::SignupApp;
use sf_core::{GuardDecision, Route};
use tracing::info;

/// Render the protected page, or report the redirect the guard decided on.
pub fn run_success(app: &SignupApp, out: &mut impl Write) -> anyhow::Result<()> {
    match app.route_guard().check(Route::Success) {
        GuardDecision::Allow => {
            let store = app.session_store();
            let email = store.user().map(|user| user.email).unwrap_or_default();
            writeln!(out, "Welcome, {email}!")?;
            writeln!(out, "Your account has been created.")?;
        }
        GuardDecision::Redirect(to) => {
            info!(to = to.path(), "success page requested without a session");
            writeln!(out, "Not signed up. Redirecting to {}", to.path())?;
        }
    }
    Ok(())
}
