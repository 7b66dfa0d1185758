use std::time::Duration;

use futures::future::BoxFuture;

/// Work run once a scheduled delay elapses.
pub type DeferredTask = BoxFuture<'static, ()>;

/// Keyed, cancellable deferred tasks.
///
/// At most one task is pending per key: scheduling a key that already has a
/// pending task cancels the old one first.
#[async_trait::async_trait]
pub trait TimerPort: Send + Sync {
    async fn schedule(&self, key: &str, delay: Duration, task: DeferredTask)
        -> anyhow::Result<()>;
    async fn cancel(&self, key: &str) -> anyhow::Result<()>;
    async fn cancel_all(&self) -> anyhow::Result<()>;
}
