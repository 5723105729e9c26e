//! Configuration types for the healthcare search service.

use health_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ServiceError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "HEALTHSEARCH_CONFIG";

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener and worker pool settings.
    pub server: ServerConfig,
    /// Search and page extraction settings.
    pub search: SearchConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port (0 = auto-assign).
    pub port: u16,
    /// Concurrent queries allowed through `/async-search`.
    pub workers: usize,
    /// Hard deadline for an `/async-search` query, including queue wait.
    pub worker_timeout_seconds: u64,
    /// Run a canned query once before accepting connections.
    pub self_test_on_start: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5001,
            workers: 4,
            worker_timeout_seconds: 30,
            self_test_on_start: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Resolve the configuration for startup.
    ///
    /// Uses `$HEALTHSEARCH_CONFIG` if set (the file must exist), otherwise the
    /// default path if a file is present there, otherwise built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self> {
        let config = if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            Self::from_file(Path::new(&path))?
        } else {
            let path = Self::default_config_path();
            if path.is_file() {
                Self::from_file(&path)?
            } else {
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the default config file path: `~/.config/healthsearch/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config)
                .join("healthsearch")
                .join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("healthsearch")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/healthsearch-config/config.toml")
        }
    }

    /// Validate server and search settings.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] for a zero worker count or timeout, and
    /// [`ServiceError::Search`] for invalid search settings.
    pub fn validate(&self) -> Result<()> {
        if self.server.workers == 0 {
            return Err(ServiceError::Config(
                "server.workers must be greater than 0".into(),
            ));
        }
        if self.server.worker_timeout_seconds == 0 {
            return Err(ServiceError::Config(
                "server.worker_timeout_seconds must be greater than 0".into(),
            ));
        }
        self.search.validate()?;
        Ok(())
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.server.workers, 4);
        assert_eq!(config.server.worker_timeout_seconds, 30);
        assert_eq!(config.search.max_results, 8);
        assert_eq!(config.bind_addr(), "0.0.0.0:5001");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
            [server]
            port = 8080

            [search]
            page_timeout_seconds = 5
        "#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.search.page_timeout_seconds, 5);
        assert_eq!(config.search.max_results, 8);
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nworkers = 2\nself_test_on_start = true\n").unwrap();

        let config = ServiceConfig::from_file(&path).unwrap();
        assert_eq!(config.server.workers, 2);
        assert!(config.server.self_test_on_start);
    }

    #[test]
    fn from_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = ServiceConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServiceConfig::from_file(Path::new("/nonexistent/healthsearch.toml")).unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)));
    }

    #[test]
    fn zero_workers_rejected() {
        let mut config = ServiceConfig::default();
        config.server.workers = 0;
        assert!(config.validate().unwrap_err().to_string().contains("workers"));
    }

    #[test]
    fn invalid_search_section_rejected() {
        let mut config = ServiceConfig::default();
        config.search.max_results = 0;
        assert!(matches!(
            config.validate().unwrap_err(),
            ServiceError::Search(_)
        ));
    }

    #[test]
    fn serialized_config_round_trips_through_toml() {
        let config = ServiceConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: ServiceConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.server.port, config.server.port);
        assert_eq!(loaded.search.base_url, config.search.base_url);
    }
}
