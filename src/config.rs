use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Configuration for the recipe browser and its gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the upstream recipe provider
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// Port the gateway binds to when running `serve`
    #[serde(default = "default_gateway_port")]
    pub gateway_port: u16,

    /// Gateway base URL the data access layer talks to
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// File holding the persisted bookmark mapping
    #[serde(default = "default_bookmarks_path")]
    pub bookmarks_path: PathBuf,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            gateway_port: default_gateway_port(),
            gateway_url: default_gateway_url(),
            bookmarks_path: default_bookmarks_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}

/// Default value for provider_url
fn default_provider_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

/// Default value for gateway_port
fn default_gateway_port() -> u16 {
    8311
}

/// Default value for gateway_url
fn default_gateway_url() -> String {
    "http://localhost:8311".to_string()
}

/// Default value for bookmarks_path
fn default_bookmarks_path() -> PathBuf {
    PathBuf::from("bookmarks.json")
}

/// Default value for request_timeout_secs
fn default_request_timeout_secs() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.provider_url, default_provider_url());
        assert_eq!(config.gateway_port, 8311);
        assert_eq!(config.bookmarks_path, PathBuf::from("bookmarks.json"));
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"gateway_port": 9000, "bookmarks_path": "/tmp/saved.json"}}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.gateway_port, 9000);
        assert_eq!(config.bookmarks_path, PathBuf::from("/tmp/saved.json"));
        assert_eq!(config.provider_url, default_provider_url());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = Config::from_file("/nonexistent/recipe-scout.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
