use std::io::Write;

use sf_app::SignupApp;
use sf_core::{GuardDecision, Route};

pub fn run_status(app: &SignupApp, out: &mut impl Write, json: bool) -> anyhow::Result<()> {
    let store = app.session_store();

    if json {
        serde_json::to_writer_pretty(&mut *out, &store.snapshot())?;
        writeln!(out)?;
        return Ok(());
    }

    match store.user() {
        Some(user) if store.is_signed_up() => {
            writeln!(out, "Signed up: yes")?;
            writeln!(out, "Email: {}", user.email)?;
            writeln!(
                out,
                "Product updates: {}",
                if user.accept_updates { "yes" } else { "no" }
            )?;
        }
        _ => writeln!(out, "Signed up: no")?,
    }

    if let Some(claims) = store.token_claims() {
        writeln!(out, "Token issued: {}", super::format_epoch_secs(claims.iat))?;
        writeln!(out, "Token expires: {}", super::format_epoch_secs(claims.exp))?;
    }

    let access = match app.route_guard().check(Route::Success) {
        GuardDecision::Allow => "allowed".to_string(),
        GuardDecision::Redirect(to) => format!("redirects to {}", to.path()),
    };
    writeln!(out, "{}: {access}", Route::Success.path())?;
    Ok(())
}
