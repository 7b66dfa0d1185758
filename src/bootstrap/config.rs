//! # Configuration loader
//!
//! Reads the TOML file and hands the parsed value to
//! [`SignupConfig::from_toml`], which owns the defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use sf_core::SignupConfig;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read, is not valid TOML, or holds a
/// value of the wrong type.
pub fn load_config(config_path: &Path, data_dir: PathBuf) -> anyhow::Result<SignupConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    SignupConfig::from_toml(&toml_value, data_dir)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Resolve the effective configuration.
///
/// An explicit `config_path` must exist. Without one, `<data_dir>/config.toml`
/// is used when present and defaults apply otherwise.
pub fn resolve_config(
    config_path: Option<&Path>,
    data_dir: &Path,
) -> anyhow::Result<SignupConfig> {
    if let Some(path) = config_path {
        return load_config(path, data_dir.to_path_buf());
    }

    let default_path = data_dir.join(CONFIG_FILE_NAME);
    if default_path.exists() {
        return load_config(&default_path, data_dir.to_path_buf());
    }

    debug!(path = %default_path.display(), "no config file, using defaults");
    Ok(SignupConfig::with_system_defaults(data_dir.to_path_buf()))
}

/// `--data-dir` when given, otherwise the platform data dir.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    let base = dirs::data_dir().context("Failed to locate the platform data directory")?;
    Ok(base.join(crate::APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [api]
            delay_ms = 25

            [form]
            error_clear_delay_ms = 10

            [storage]
            path = "/path/to/session.json"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path(), PathBuf::from("/data")).unwrap();

        assert_eq!(config.api_delay_ms, 25);
        assert_eq!(config.error_clear_delay_ms, 10);
        assert_eq!(config.storage_path, PathBuf::from("/path/to/session.json"));
    }

    #[test]
    fn test_load_config_fills_missing_values_with_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api]\n").unwrap();

        let config = load_config(temp_file.path(), PathBuf::from("/data")).unwrap();

        assert_eq!(
            config,
            SignupConfig::with_system_defaults(PathBuf::from("/data"))
        );
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api\ndelay_ms = ").unwrap();

        let err = load_config(temp_file.path(), PathBuf::from("/data")).unwrap_err();
        assert!(err.to_string().contains("parse config"));
    }

    #[test]
    fn test_load_config_rejects_negative_delay() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api]\ndelay_ms = -5\n").unwrap();

        assert!(load_config(temp_file.path(), PathBuf::from("/data")).is_err());
    }

    #[test]
    fn test_resolve_config_uses_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();

        let config = resolve_config(None, temp_dir.path()).unwrap();

        assert_eq!(config.storage_path, temp_dir.path().join("session.json"));
    }

    #[test]
    fn test_resolve_config_picks_up_file_in_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[form]\nerror_clear_delay_ms = 5\n",
        )
        .unwrap();

        let config = resolve_config(None, temp_dir.path()).unwrap();

        assert_eq!(config.error_clear_delay_ms, 5);
    }

    #[test]
    fn test_resolve_config_requires_explicit_file_to_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        assert!(resolve_config(Some(&missing), temp_dir.path()).is_err());
    }

    #[test]
    fn test_resolve_data_dir_prefers_override() {
        let dir = resolve_data_dir(Some(PathBuf::from("/custom"))).unwrap();
        assert_eq!(dir, PathBuf::from("/custom"));
    }
}
