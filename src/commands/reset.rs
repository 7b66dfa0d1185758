use std::io::Write;

use sf_app::SignupApp;

pub async fn run_reset(app: &SignupApp, out: &mut impl Write) -> anyhow::Result<()> {
    app.session_store().reset_signup().await;
    writeln!(out, "Session cleared")?;
    Ok(())
}
