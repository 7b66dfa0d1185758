//! # Signup configuration DTO
//!
//! Data only. Loading from disk lives in the binary's bootstrap layer.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_DELAY_MS: u64 = 1_000;
pub const DEFAULT_ERROR_CLEAR_DELAY_MS: u64 = 300;
pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Signup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupConfig {
    /// Simulated round-trip of the signup api call.
    pub api_delay_ms: u64,

    /// Grace period before a field error disappears while the user types.
    pub error_clear_delay_ms: u64,

    /// Session storage file (path info only, no existence check).
    pub storage_path: PathBuf,
}

impl SignupConfig {
    /// Defaults rooted at `data_dir`.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            api_delay_ms: DEFAULT_API_DELAY_MS,
            error_clear_delay_ms: DEFAULT_ERROR_CLEAR_DELAY_MS,
            storage_path: data_dir.join(DEFAULT_SESSION_FILE),
        }
    }

    /// Overlay values present in `toml_value` on top of the defaults for
    /// `data_dir`. Missing sections keep their default.
    pub fn from_toml(toml_value: &toml::Value, data_dir: PathBuf) -> anyhow::Result<Self> {
        let defaults = Self::with_system_defaults(data_dir);

        let api_delay_ms = match toml_value.get("api").and_then(|a| a.get("delay_ms")) {
            Some(value) => read_millis(value, "api.delay_ms")?,
            None => defaults.api_delay_ms,
        };
        let error_clear_delay_ms = match toml_value
            .get("form")
            .and_then(|f| f.get("error_clear_delay_ms"))
        {
            Some(value) => read_millis(value, "form.error_clear_delay_ms")?,
            None => defaults.error_clear_delay_ms,
        };
        let storage_path = toml_value
            .get("storage")
            .and_then(|s| s.get("path"))
            .and_then(|v| v.as_str())
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        Ok(Self {
            api_delay_ms,
            error_clear_delay_ms,
            storage_path,
        })
    }

    pub fn api_delay(&self) -> Duration {
        Duration::from_millis(self.api_delay_ms)
    }

    pub fn error_clear_delay(&self) -> Duration {
        Duration::from_millis(self.error_clear_delay_ms)
    }
}

fn read_millis(value: &toml::Value, key: &str) -> anyhow::Result<u64> {
    let millis = value
        .as_integer()
        .ok_or_else(|| anyhow::anyhow!("{key} must be an integer"))?;
    u64::try_from(millis).map_err(|_| anyhow::anyhow!("{key} must not be negative, got {millis}"))
}
