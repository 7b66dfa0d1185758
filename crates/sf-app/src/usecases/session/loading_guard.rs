use super::store::SessionStore;

/// Holds the loading flag for one signup attempt.
///
/// Acquiring starts the attempt; dropping the guard releases the flag on
/// every exit path, including early returns and cancellation.
pub(super) struct LoadingGuard<'a> {
    store: &'a SessionStore,
    attempt: u64,
}

impl<'a> LoadingGuard<'a> {
    pub(super) fn acquire(store: &'a SessionStore) -> Self {
        let attempt = store.begin_attempt();
        Self { store, attempt }
    }

    pub(super) fn attempt(&self) -> u64 {
        self.attempt
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.finish_attempt(self.attempt);
    }
}
