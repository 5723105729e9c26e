//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls how many results are requested, request
//! timeouts, and the identity presented to remote servers. The defaults
//! match a polite, single-engine scraper.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default DuckDuckGo HTML-only endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// Configuration for the search and extraction pipeline.
///
/// Loadable from the `[search]` table of the service TOML file; missing
/// fields fall back to [`Default::default()`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of candidate results requested from the provider.
    pub max_results: usize,
    /// Timeout for a search provider request, in seconds.
    pub timeout_seconds: u64,
    /// Timeout for a single page fetch, in seconds.
    pub page_timeout_seconds: u64,
    /// Whether to request safe search filtering from the provider.
    pub safe_search: bool,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Search endpoint. Overridable so tests can point at a mock server.
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 8,
            timeout_seconds: 8,
            page_timeout_seconds: 10,
            safe_search: true,
            user_agent: None,
            base_url: DEFAULT_SEARCH_URL.to_owned(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_seconds` and `page_timeout_seconds` must be greater than 0
    /// - `base_url` must parse as an absolute URL
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.page_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "page_timeout_seconds must be greater than 0".into(),
            ));
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(SearchError::Config(format!(
                "base_url is not a valid URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.max_results, 8);
        assert_eq!(config.timeout_seconds, 8);
        assert_eq!(config.page_timeout_seconds, 10);
        assert!(config.safe_search);
        assert!(config.user_agent.is_none());
        assert_eq!(config.base_url, DEFAULT_SEARCH_URL);
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_page_timeout_rejected() {
        let config = SearchConfig {
            page_timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("page_timeout_seconds"));
    }

    #[test]
    fn relative_base_url_rejected() {
        let config = SearchConfig {
            base_url: "/html/".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"max_results": 3}"#).expect("deserialize");
        assert_eq!(config.max_results, 3);
        assert_eq!(config.page_timeout_seconds, 10);
        assert!(config.safe_search);
    }
}
