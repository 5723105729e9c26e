//! Core data shapes flowing through the health query pipeline.

use serde::{Deserialize, Serialize};

/// A raw hit as returned by a search provider, before trust scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSearchHit {
    /// Title of the result page.
    pub title: String,
    /// Target URL of the result.
    pub url: String,
    /// Text snippet shown by the search engine.
    pub snippet: String,
}

/// A ranked search result annotated with its source domain and trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page.
    pub title: String,
    /// The URL of the result.
    pub url: String,
    /// A text snippet summarising the page content.
    pub snippet: String,
    /// Lower-cased host of `url`, empty when the URL could not be parsed.
    pub domain: String,
    /// Whether `domain` matches the trusted medical source list.
    pub is_trusted_source: bool,
    /// 1.0 for trusted sources, 0.5 otherwise.
    pub relevance_score: f64,
}

/// Extracted page content from one trusted source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedInfo {
    /// Domain the content came from.
    pub source: String,
    /// Title of the originating search result.
    pub title: String,
    /// URL the content was fetched from.
    pub url: String,
    /// Leading excerpt of the extracted text (at most 500 characters).
    pub content: String,
}

/// The answer to one health query.
///
/// Which optional fields are populated depends on how far the query got:
/// out-of-scope queries carry only `message`, queries with no search
/// results carry `message` and an empty `sources`, and answered queries
/// carry everything except `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthcareQueryResult {
    pub is_healthcare_related: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SearchResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_info: Option<Vec<DetailedInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthcareQueryResult {
    /// Result for a query that is not about health.
    pub fn out_of_scope(message: impl Into<String>) -> Self {
        Self {
            is_healthcare_related: false,
            query: None,
            response: None,
            sources: None,
            detailed_info: None,
            disclaimer: None,
            message: Some(message.into()),
        }
    }

    /// Result for a health query where the search produced nothing usable.
    pub fn no_results(message: impl Into<String>) -> Self {
        Self {
            is_healthcare_related: true,
            sources: Some(Vec::new()),
            ..Self::out_of_scope(message)
        }
    }
}

/// Result of a collaborator call that never fails outright.
///
/// Distinguishes "the call worked but found nothing" from "the call failed"
/// so that callers can log and test the two paths separately even though
/// both usually lead to the same user-facing behaviour.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The call produced a non-empty value.
    Ready(T),
    /// The call succeeded but produced nothing.
    Empty,
    /// The call failed; the reason is kept for logging.
    Degraded(String),
}

impl<T> Outcome<T> {
    /// Returns the value if [`Outcome::Ready`].
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Empty | Self::Degraded(_) => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

impl<T: Default> Outcome<T> {
    /// Collapses `Empty` and `Degraded` into `T::default()`.
    pub fn unwrap_or_default(self) -> T {
        self.ready().unwrap_or_default()
    }
}
