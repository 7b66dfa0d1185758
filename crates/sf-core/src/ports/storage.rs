use async_trait::async_trait;
use thiserror::Error;

/// Key/value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    #[error("storage io failed: {0}")]
    Io(String),

    /// Stored data is corrupt or invalid.
    #[error("storage data corrupt: {0}")]
    Corrupt(String),
}

/// Durable string key/value storage, scoped to one installation.
///
/// Values are opaque strings; callers choose the encoding (JSON here).
#[async_trait]
pub trait KeyValueStoragePort: Send + Sync {
    /// Get a value by key, `None` when the key was never written or removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set a value by key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
