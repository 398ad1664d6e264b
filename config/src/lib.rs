//! Configuration for jsonboard, read from `~/.jsonboard/config.toml`.
//!
//! Every field is optional; accessors on [`JsonboardConfig`] fill in defaults.
//!
//! ```toml
//! [api]
//! base_url = "https://jsonplaceholder.typicode.com"
//! timeout_secs = 10
//! max_retries = 1
//!
//! [app]
//! default_user_id = 1
//! ```

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_USER_ID: u64 = 1;

#[derive(Debug, Default, Deserialize)]
pub struct JsonboardConfig {
    pub api: Option<ApiConfig>,
    pub app: Option<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiConfig {
    /// Supports `${ENV_VAR}` expansion.
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Pre-filled author id on the new-post form.
    pub default_user_id: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Replace each `${VAR}` with the variable's value (empty if unset).
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

impl JsonboardConfig {
    /// Load from the default location. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "Failed to read config");
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let config = toml::from_str(&content).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "Failed to parse config");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(Some(config))
    }

    /// API base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let raw = self
            .api
            .as_ref()
            .and_then(|api| api.base_url.as_deref())
            .map(expand_env_vars)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        raw.trim().trim_end_matches('/').to_string()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        let secs = self
            .api
            .as_ref()
            .and_then(|api| api.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.api
            .as_ref()
            .and_then(|api| api.max_retries)
            .unwrap_or(DEFAULT_MAX_RETRIES)
    }

    #[must_use]
    pub fn default_user_id(&self) -> u64 {
        self.app
            .as_ref()
            .and_then(|app| app.default_user_id)
            .filter(|id| *id >= 1)
            .unwrap_or(DEFAULT_USER_ID)
    }
}

/// `~/.jsonboard`, home of the config file and logs.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".jsonboard"))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn expand_env_vars_replaces_and_blanks() {
        unsafe {
            std::env::set_var("JSONBOARD_TEST_HOST", "localhost:8080");
            std::env::remove_var("JSONBOARD_TEST_MISSING");
        }
        assert_eq!(
            expand_env_vars("http://${JSONBOARD_TEST_HOST}/api${JSONBOARD_TEST_MISSING}"),
            "http://localhost:8080/api"
        );
        unsafe {
            std::env::remove_var("JSONBOARD_TEST_HOST");
        }
    }

    #[test]
    fn expand_env_vars_keeps_unterminated_reference() {
        assert_eq!(expand_env_vars("a${B"), "a${B");
        assert_eq!(expand_env_vars("${}x"), "x");
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config: JsonboardConfig = toml::from_str("").unwrap();
        assert!(config.api.is_none());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.max_retries(), DEFAULT_MAX_RETRIES);
        assert_eq!(config.default_user_id(), DEFAULT_USER_ID);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[api]
base_url = "http://127.0.0.1:9000/"
timeout_secs = 3
max_retries = 0

[app]
default_user_id = 4
"#;
        let config: JsonboardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.max_retries(), 0);
        assert_eq!(config.default_user_id(), 4);
    }

    #[test]
    fn zero_values_fall_back() {
        let toml_str = r#"
[api]
timeout_secs = 0

[app]
default_user_id = 0
"#;
        let config: JsonboardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.default_user_id(), DEFAULT_USER_ID);
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonboardConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[app]\ndefault_user_id = 9").unwrap();

        let config = JsonboardConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.default_user_id(), 9);
    }

    #[test]
    fn load_from_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();

        let err = JsonboardConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }
}
