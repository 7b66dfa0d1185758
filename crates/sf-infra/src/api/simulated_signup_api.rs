use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use sf_core::ports::SignupApiPort;
use sf_core::ValidatedSignup;

/// Stand-in backend: waits for a fixed delay and accepts every signup.
pub struct SimulatedSignupApi {
    delay: Duration,
}

impl SimulatedSignupApi {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl SignupApiPort for SimulatedSignupApi {
    async fn register(&self, signup: &ValidatedSignup) -> anyhow::Result<()> {
        debug!(
            email = signup.email(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating signup request"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}
