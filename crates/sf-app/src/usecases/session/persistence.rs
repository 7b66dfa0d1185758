//! Maps the durable session onto three storage keys.
//!
//! | key               | value                                    |
//! |-------------------|------------------------------------------|
//! | `auth.user`       | `{"email","acceptUpdates"}` or `null`    |
//! | `auth.token`      | token string or `null`                   |
//! | `auth.isSignedUp` | `true` / `false`                         |

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use sf_core::ports::{KeyValueStoragePort, StorageError};
use sf_core::{SessionState, SessionToken, SessionUser};

pub const USER_KEY: &str = "auth.user";
pub const TOKEN_KEY: &str = "auth.token";
pub const SIGNED_UP_KEY: &str = "auth.isSignedUp";

pub struct SessionPersistence {
    storage: Arc<dyn KeyValueStoragePort>,
}

impl SessionPersistence {
    pub fn new(storage: Arc<dyn KeyValueStoragePort>) -> Self {
        Self { storage }
    }

    /// Load the durable session.
    ///
    /// Values that fail to decode are logged and read as absent. A record
    /// claiming `signed_up` without a user is loaded as signed out.
    pub async fn load(&self) -> Result<SessionState, StorageError> {
        let user = self
            .read_json::<Option<SessionUser>>(USER_KEY)
            .await?
            .flatten();
        let token = self
            .read_json::<Option<SessionToken>>(TOKEN_KEY)
            .await?
            .flatten();
        let signed_up = self
            .read_json::<bool>(SIGNED_UP_KEY)
            .await?
            .unwrap_or(false);

        let mut state = SessionState {
            user,
            token,
            signed_up,
        };
        if !state.is_consistent() {
            warn!("persisted session is signed up without a user, ignoring signed-up flag");
            state.signed_up = false;
        }

        debug!(
            authenticated = state.is_authenticated(),
            signed_up = state.signed_up,
            "session loaded from storage"
        );
        Ok(state)
    }

    /// Write all three keys.
    ///
    /// The user record decides whether a reload is authenticated, so it is
    /// written last when signing in and first when signing out. A write that
    /// stops halfway never leaves a user without the rest of the session.
    pub async fn save(&self, state: &SessionState) -> Result<(), StorageError> {
        if state.user.is_none() {
            self.write_json(USER_KEY, &state.user).await?;
        }
        self.write_json(SIGNED_UP_KEY, &state.signed_up).await?;
        self.write_json(TOKEN_KEY, &state.token).await?;
        if state.user.is_some() {
            self.write_json(USER_KEY, &state.user).await?;
        }
        Ok(())
    }

    /// Reset the persisted keys to the signed-out values.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.save(&SessionState::default()).await
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let raw = match self.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(StorageError::Corrupt(reason)) => {
                warn!(key, %reason, "persisted session unreadable, treating as signed out");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, error = %err, "discarding malformed persisted value");
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StorageError::Corrupt(format!("serialize {key} failed: {e}")))?;
        self.storage.set(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::TokenClaims;
    use sf_infra::storage::InMemoryKeyValueStorage;

    fn signed_up_state() -> SessionState {
        let claims = TokenClaims::issue("a@b.com", 1_700_000_000);
        SessionState::signed_up(
            SessionUser {
                email: "a@b.com".to_string(),
                accept_updates: true,
            },
            SessionToken::issue(&claims).unwrap(),
        )
    }

    #[tokio::test]
    async fn empty_storage_loads_signed_out_state() {
        let persistence = SessionPersistence::new(Arc::new(InMemoryKeyValueStorage::new()));

        let state = persistence.load().await.unwrap();

        assert_eq!(state, SessionState::default());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let persistence = SessionPersistence::new(Arc::new(InMemoryKeyValueStorage::new()));
        let state = signed_up_state();

        persistence.save(&state).await.unwrap();

        assert_eq!(persistence.load().await.unwrap(), state);
    }

    #[tokio::test]
    async fn writes_camel_case_user_json() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let persistence = SessionPersistence::new(storage.clone());

        persistence.save(&signed_up_state()).await.unwrap();

        let raw = storage.get(USER_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["acceptUpdates"], true);
        assert_eq!(storage.get(SIGNED_UP_KEY).await.unwrap().as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn clear_writes_null_values() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let persistence = SessionPersistence::new(storage.clone());
        persistence.save(&signed_up_state()).await.unwrap();

        persistence.clear().await.unwrap();

        assert_eq!(storage.get(USER_KEY).await.unwrap().as_deref(), Some("null"));
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("null"));
        assert_eq!(storage.get(SIGNED_UP_KEY).await.unwrap().as_deref(), Some("false"));
        assert_eq!(persistence.load().await.unwrap(), SessionState::default());
    }

    #[tokio::test]
    async fn malformed_user_is_ignored_and_signed_up_dropped() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        storage.set(USER_KEY, "{not json").await.unwrap();
        storage.set(SIGNED_UP_KEY, "true").await.unwrap();
        let persistence = SessionPersistence::new(storage);

        let state = persistence.load().await.unwrap();

        assert!(state.user.is_none());
        assert!(!state.signed_up);
    }

    struct CorruptStorage;

    #[async_trait::async_trait]
    impl KeyValueStoragePort for CorruptStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Corrupt("expected value at line 1".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn corrupt_storage_loads_signed_out_state() {
        let persistence = SessionPersistence::new(Arc::new(CorruptStorage));

        let state = persistence.load().await.unwrap();

        assert_eq!(state, SessionState::default());
    }
}
