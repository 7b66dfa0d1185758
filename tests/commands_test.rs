use std::path::PathBuf;

use sf_core::SignupConfig;
use signup_form::bootstrap::start_app;
use signup_form::commands::{run_reset, run_signup, run_status, run_success};
use tempfile::TempDir;

fn test_config(data_dir: PathBuf) -> SignupConfig {
    SignupConfig {
        api_delay_ms: 0,
        ..SignupConfig::with_system_defaults(data_dir)
    }
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn signup_then_success_then_reset() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path().to_path_buf());

    let app = start_app(&config).await.unwrap();
    let mut out = Vec::new();
    run_signup(&app, &mut out, "cli@example.com".into(), "Passw0rd!".into(), true)
        .await
        .unwrap();
    assert!(output(out).starts_with("Signed up as cli@example.com"));

    // A fresh process sees the persisted session.
    let app = start_app(&config).await.unwrap();
    let mut out = Vec::new();
    run_success(&app, &mut out).unwrap();
    assert!(output(out).contains("Welcome, cli@example.com!"));

    let mut out = Vec::new();
    run_status(&app, &mut out, false).unwrap();
    let status = output(out);
    assert!(status.contains("Signed up: yes"));
    assert!(status.contains("Product updates: yes"));
    assert!(status.contains("/success: allowed"));

    let mut out = Vec::new();
    run_reset(&app, &mut out).await.unwrap();
    assert_eq!(output(out), "Session cleared\n");

    let app = start_app(&config).await.unwrap();
    let mut out = Vec::new();
    run_success(&app, &mut out).unwrap();
    assert_eq!(output(out), "Not signed up. Redirecting to /\n");
}

#[tokio::test]
async fn rejected_signup_prints_field_errors() {
    let temp_dir = TempDir::new().unwrap();
    let app = start_app(&test_config(temp_dir.path().to_path_buf()))
        .await
        .unwrap();

    let mut out = Vec::new();
    let result = run_signup(&app, &mut out, "nope".into(), "short".into(), false).await;

    assert!(result.is_err());
    let printed = output(out);
    assert!(printed.contains("email: Please enter a valid email address"));
    assert!(printed.contains("password: Password must be at least 8 characters"));
    assert!(!app.session_store().is_authenticated());
}

#[tokio::test]
async fn status_json_reports_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let app = start_app(&test_config(temp_dir.path().to_path_buf()))
        .await
        .unwrap();

    let mut out = Vec::new();
    run_status(&app, &mut out, true).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["signedUp"], serde_json::Value::Bool(false));
    assert_eq!(value["isLoading"], serde_json::Value::Bool(false));
}

#[tokio::test]
async fn reset_works_on_corrupt_session_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path().to_path_buf());
    std::fs::write(&config.storage_path, "{not json").unwrap();

    let app = start_app(&config).await.unwrap();
    let mut out = Vec::new();
    run_reset(&app, &mut out).await.unwrap();
    assert_eq!(output(out), "Session cleared\n");

    let app = start_app(&config).await.unwrap();
    let mut out = Vec::new();
    run_status(&app, &mut out, false).unwrap();
    assert!(output(out).contains("Signed up: no"));
}
