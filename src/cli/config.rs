//! Configuration loading
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. JSON file passed with `--config`
//! 3. `MONGO_URI` environment variable
//! 4. Command line flags

use std::fs;
use std::path::Path;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::http_server::config::{default_host, default_port};
use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::storage::{DEFAULT_COLLECTION, DEFAULT_DATABASE};

use super::errors::{CliError, CliResult};

/// Environment variable holding the store connection string
pub const MONGO_URI_ENV: &str = "MONGO_URI";

/// Connection string used when nothing else is configured
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_mongo_uri")]
    pub mongo_uri: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_mongo_uri() -> String {
    DEFAULT_MONGO_URI.to_string()
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            mongo_uri: default_mongo_uri(),
            database: default_database(),
            collection: default_collection(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file, then apply `MONGO_URI`
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Parse a JSON configuration file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Apply environment overrides read through `lookup`
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(MONGO_URI_ENV).filter(|v| !v.is_empty()) {
            self.mongo_uri = uri;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> CliResult<()> {
        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        let scheme_ok = self.mongo_uri.starts_with("mongodb://")
            || self.mongo_uri.starts_with("mongodb+srv://");
        if !scheme_ok {
            return Err(CliError::config_error(format!(
                "Invalid mongo_uri: '{}'. Expected a mongodb:// or mongodb+srv:// URI.",
                self.mongo_uri
            )));
        }

        self.validate_cors_origins()?;

        if self.database.is_empty() {
            return Err(CliError::config_error("database must not be empty"));
        }

        if self.collection.is_empty() {
            return Err(CliError::config_error("collection must not be empty"));
        }

        self.severity()?;

        Ok(())
    }

    /// `"*"` is accepted only as the sole entry; every other entry must be a
    /// valid header value
    fn validate_cors_origins(&self) -> CliResult<()> {
        let has_wildcard = self.cors_origins.iter().any(|o| o == "*");
        if has_wildcard && self.cors_origins.len() > 1 {
            return Err(CliError::config_error(
                "cors_origins: '*' cannot be combined with explicit origins",
            ));
        }

        for origin in &self.cors_origins {
            if origin.is_empty() || HeaderValue::from_str(origin).is_err() {
                return Err(CliError::config_error(format!(
                    "Invalid cors origin: {:?}",
                    origin
                )));
            }
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// HTTP section of the configuration
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, value: serde_json::Value) -> std::path::PathBuf {
        let path = temp_dir.path().join("notetree.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.mongo_uri, "mongodb://localhost:27017/");
        assert_eq!(config.database, "onenote_clone");
        assert_eq!(config.collection, "contents");
        assert_eq!(config.port, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_fills_missing_fields_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({ "port": 8080 }));

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.mongo_uri, DEFAULT_MONGO_URI);
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({ "mongo_uri": "mongodb://file:27017/" }));

        let config = Config::from_file(&path)
            .unwrap()
            .with_env(|key| (key == MONGO_URI_ENV).then(|| "mongodb://env:27017/".to_string()));
        assert_eq!(config.mongo_uri, "mongodb://env:27017/");
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let config = Config::default().with_env(|_| Some(String::new()));
        assert_eq!(config.mongo_uri, DEFAULT_MONGO_URI);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notetree.json");
        fs::write(&path, "{ nope").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_uri = Config {
            mongo_uri: "postgres://localhost".to_string(),
            ..Default::default()
        };
        assert!(bad_uri.validate().is_err());

        let bad_port = Config {
            port: 0,
            ..Default::default()
        };
        assert!(bad_port.validate().is_err());

        let bad_level = Config {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_validate_cors_origins() {
        let wildcard = Config {
            cors_origins: vec!["*".to_string()],
            ..Default::default()
        };
        assert!(wildcard.validate().is_ok());

        let mixed = Config {
            cors_origins: vec!["*".to_string(), "http://localhost:3000".to_string()],
            ..Default::default()
        };
        let err = mixed.validate().unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);

        let garbled = Config {
            cors_origins: vec!["http://localhost:3000\n".to_string()],
            ..Default::default()
        };
        let err = garbled.validate().unwrap_err();
        assert!(err.message().contains("Invalid cors origin"));

        let empty = Config {
            cors_origins: vec![String::new()],
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_http_config_projection() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let http = config.http_config();
        assert_eq!(http.socket_addr(), "127.0.0.1:9000");
        assert_eq!(http.cors_origins, vec!["http://localhost:5173".to_string()]);
    }
}
