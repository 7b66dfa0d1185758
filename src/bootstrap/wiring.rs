//! Adapter wiring: turns a [`SignupConfig`] into [`SignupDeps`].

use std::sync::Arc;

use sf_app::{SignupApp, SignupDeps};
use sf_core::SignupConfig;
use sf_infra::api::SimulatedSignupApi;
use sf_infra::storage::FileKeyValueStorage;
use sf_infra::time::TokioTimer;
use sf_infra::SystemClock;
use tracing::info;

pub fn wire_dependencies(config: &SignupConfig) -> SignupDeps {
    SignupDeps {
        storage: Arc::new(FileKeyValueStorage::new(config.storage_path.clone())),
        signup_api: Arc::new(SimulatedSignupApi::new(config.api_delay())),
        clock: Arc::new(SystemClock),
        timer: Arc::new(TokioTimer::new()),
    }
}

/// Wire adapters and start the app with the persisted session restored.
pub async fn start_app(config: &SignupConfig) -> anyhow::Result<SignupApp> {
    info!(
        storage = %config.storage_path.display(),
        api_delay_ms = config.api_delay_ms,
        "wiring signup app"
    );
    SignupApp::start(wire_dependencies(config), config.error_clear_delay()).await
}
