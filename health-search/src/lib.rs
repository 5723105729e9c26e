//! # health-search
//!
//! Answers free-text health questions from trusted medical web sources.
//!
//! A query is checked against a healthcare keyword list, searched on the web
//! with a medical qualifier, ranked so that well-known medical publishers come
//! first, and the leading trusted pages are fetched and reduced to plain text.
//! The result is a templated answer with citations and a disclaimer.
//!
//! ## Design
//!
//! - Scrapes DuckDuckGo's HTML endpoint, so no API keys are needed
//! - Search and page fetching sit behind the [`SearchProvider`] and
//!   [`PageFetcher`] traits so the whole pipeline runs against mocks
//! - Collaborator failures degrade to partial answers and never abort a query
//! - Nothing is cached or persisted; the service holds no mutable state
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - Queries are logged only at trace level

pub mod classifier;
pub mod composer;
pub mod config;
pub mod content;
pub mod domain;
pub mod engines;
pub mod error;
pub mod fetch;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod searcher;
pub mod text;
pub mod types;

pub use classifier::is_healthcare_query;
pub use config::SearchConfig;
pub use content::{ContentExtractor, extract_text};
pub use domain::{TRUSTED_MEDICAL_SOURCES, extract_domain, is_trusted_domain};
pub use error::{Result, SearchError};
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use orchestrator::{DISCLAIMER, HealthSearch, NO_RESULTS_MESSAGE, OUT_OF_SCOPE_MESSAGE};
pub use provider::SearchProvider;
pub use searcher::WebSearcher;
pub use types::{DetailedInfo, HealthcareQueryResult, Outcome, RawSearchHit, SearchResult};

/// Answer a health question using the production collaborators.
///
/// Convenience wrapper that builds a [`HealthSearch`] from `config` and runs
/// a single query. Long-running callers should build the service once and
/// reuse it.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Search and fetch
/// failures do not surface here; they degrade the returned result instead.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> health_search::Result<()> {
/// let config = health_search::SearchConfig::default();
/// let answer = health_search::answer("What are the symptoms of diabetes?", &config).await?;
/// if let Some(response) = answer.response {
///     println!("{response}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn answer(query: &str, config: &SearchConfig) -> Result<HealthcareQueryResult> {
    let service = HealthSearch::from_config(config)?;
    Ok(service.process_query(query).await)
}
