//! Error types for the health-search crate.
//!
//! Errors carry stable string messages suitable for logging. Collaborator
//! failures are normally absorbed into [`crate::types::Outcome::Degraded`]
//! by the pipeline; these types surface only from the low-level provider
//! and fetcher calls and from configuration validation.

/// Errors that can occur while searching or fetching pages.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request exceeded its fixed timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The remote server answered with a non-success status code.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code returned.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// Failed to parse a search response or page.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Classify a [`reqwest::Error`] into a timeout, status, or generic HTTP error.
    pub(crate) fn from_reqwest(err: reqwest::Error, context: &str) -> Self {
        if err.is_timeout() {
            return Self::Timeout(format!("{context}: {err}"));
        }
        if let Some(status) = err.status() {
            return Self::Status {
                status: status.as_u16(),
                url: err.url().map(ToString::to_string).unwrap_or_default(),
            };
        }
        Self::Http(format!("{context}: {err}"))
    }
}

/// Convenience type alias for health-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
