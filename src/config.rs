//! Configuration.
//!
//! Layered with [`figment`]: built-in defaults, then an optional TOML file,
//! then `HN_SEARCH_*` environment variables.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::DEFAULT_ENDPOINT;
use crate::store::FileStore;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix the URL-encoded search term is appended to.
    pub endpoint: String,
    /// Term used when nothing has been persisted yet.
    pub default_term: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Where the last search term is kept.  Defaults to the data directory.
    pub store_path: Option<PathBuf>,
    /// Log destination.  Defaults to the data directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_term: "React".to_string(),
            timeout_secs: 10,
            store_path: None,
            log_file: None,
        }
    }
}

impl Config {
    /// `<config_dir>/hn-search/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hn-search").join("config.toml"))
    }

    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path.clone().or_else(FileStore::default_path)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join("hn-search").join("hn-search.log"))
        })
    }
}

/// Load configuration.
///
/// An explicit `path` must exist.  Without one, the default location is used
/// when present and skipped otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) if !path.exists() => {
            return Err(ConfigError::FileNotFound(path.display().to_string()))
        }
        Some(path) => Some(path.to_path_buf()),
        None => Config::default_path().filter(|p| p.exists()),
    };

    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(file) = file {
        figment = figment.merge(Toml::file(file));
    }

    figment
        .merge(Env::prefixed("HN_SEARCH_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from a TOML string on top of the defaults.
#[cfg(test)]
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::string(toml_str))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Validate configuration.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "endpoint must be an http(s) URL, got {:?}",
            config.endpoint
        )));
    }
    if config.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "timeout_secs cannot be 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.default_term, "React");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_config_from_str_overrides() {
        let toml = r#"
endpoint = "http://localhost:8080/search?query="
default_term = "Rust"
timeout_secs = 3
store_path = "/tmp/hn/store.json"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/search?query=");
        assert_eq!(config.default_term, "Rust");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.store_path(), Some(PathBuf::from("/tmp/hn/store.json")));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let result = load_config_from_str("timeout_secs = \"soon\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/hn-search.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
default_term = "Svelte"
log_file = "/tmp/hn-search.log"
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.default_term, "Svelte");
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/hn-search.log")));
        assert_eq!(config.timeout_secs, 10, "unset keys keep defaults");
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let config = Config {
            endpoint: "ftp://example.com/?q=".into(),
            ..Config::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
