use async_trait::async_trait;

use crate::signup::ValidatedSignup;

/// Backend that accepts a validated signup.
///
/// The only production implementation is simulated; the port exists so the
/// store can be tested against slow and failing backends.
#[async_trait]
pub trait SignupApiPort: Send + Sync {
    async fn register(&self, signup: &ValidatedSignup) -> anyhow::Result<()>;
}
