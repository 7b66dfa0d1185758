use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sf_core::ports::{KeyValueStoragePort, StorageError};

/// Process-local storage, lost when the process exits.
#[derive(Default)]
pub struct InMemoryKeyValueStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Io("in-memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStoragePort for InMemoryKeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let storage = InMemoryKeyValueStorage::new();
        assert_eq!(storage.get("auth.user").await.unwrap(), None);

        storage.set("auth.user", "null").await.unwrap();
        storage.set("auth.user", "{\"email\":\"a@b.co\"}").await.unwrap();
        assert_eq!(
            storage.get("auth.user").await.unwrap().as_deref(),
            Some("{\"email\":\"a@b.co\"}")
        );

        storage.remove("auth.user").await.unwrap();
        storage.remove("auth.user").await.unwrap();
        assert_eq!(storage.get("auth.user").await.unwrap(), None);
    }
}
