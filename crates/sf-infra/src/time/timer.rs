use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use sf_core::ports::{DeferredTask, TimerPort};

/// Tokio-backed [`TimerPort`].
///
/// Each key maps to the abort handle of its pending task. The deadline is
/// fixed when `schedule` is called. A task removes its own entry before
/// running, so a fired task is never aborted by a late `cancel`.
pub struct TokioTimer {
    timers: Arc<Mutex<HashMap<String, (u64, tokio::task::AbortHandle)>>>,
    next_id: std::sync::atomic::AtomicU64,
}

impl TokioTimer {
    pub fn new() -> Self {
        Self {
            timers: Arc::new(Mutex::new(HashMap::new())),
            next_id: std::sync::atomic::AtomicU64::new(0),
        }
    }

    pub async fn pending(&self) -> usize {
        self.timers.lock().await.len()
    }
}

impl Default for TokioTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TimerPort for TokioTimer {
    async fn schedule(
        &self,
        key: &str,
        delay: Duration,
        task: DeferredTask,
    ) -> anyhow::Result<()> {
        let timers = Arc::clone(&self.timers);
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let owned_key = key.to_string();
        let deadline = Instant::now() + delay;

        let mut timers_guard = self.timers.lock().await;
        if let Some((_, existing)) = timers_guard.remove(key) {
            existing.abort();
            debug!(key, "pending timer replaced");
        }

        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            {
                let mut timers_guard = timers.lock().await;
                // Only drop our own entry; a newer task may own the key.
                if matches!(timers_guard.get(&owned_key), Some((entry_id, _)) if *entry_id == id) {
                    timers_guard.remove(&owned_key);
                }
            }
            task.await;
        });

        timers_guard.insert(key.to_string(), (id, handle.abort_handle()));
        debug!(key, delay_ms = delay.as_millis() as u64, "timer scheduled");
        Ok(())
    }

    async fn cancel(&self, key: &str) -> anyhow::Result<()> {
        let mut timers_guard = self.timers.lock().await;
        if let Some((_, handle)) = timers_guard.remove(key) {
            handle.abort();
            debug!(key, "timer cancelled");
        }
        Ok(())
    }

    async fn cancel_all(&self) -> anyhow::Result<()> {
        let mut timers_guard = self.timers.lock().await;
        let cancelled = timers_guard.len();
        for (_, (_, handle)) in timers_guard.drain() {
            handle.abort();
        }
        if cancelled > 0 {
            debug!(cancelled, "all timers cancelled");
        }
        Ok(())
    }
}
