//! End-to-end query pipeline: classify, search, extract, compose.
//!
//! # Pipeline
//!
//! 1. Reject queries the classifier does not consider health-related
//! 2. Run a qualified, trust-ranked web search
//! 3. Extract page text from the trusted results among the top three,
//!    concurrently, keeping candidate order
//! 4. Compose the answer and package it with the top five sources and a
//!    disclaimer
//!
//! Collaborator failures never abort a query: a failed search reads as "no
//! results" and a failed page is left out of `detailed_info`.

use std::sync::Arc;

use crate::classifier::is_healthcare_query;
use crate::composer::compose_response;
use crate::config::SearchConfig;
use crate::content::ContentExtractor;
use crate::engines::DuckDuckGoProvider;
use crate::error::Result;
use crate::fetch::{HttpPageFetcher, PageFetcher};
use crate::provider::SearchProvider;
use crate::searcher::WebSearcher;
use crate::text::truncate_chars;
use crate::types::{DetailedInfo, HealthcareQueryResult, Outcome, SearchResult};

/// Message for queries that are not about health.
pub const OUT_OF_SCOPE_MESSAGE: &str = "This query doesn't appear to be healthcare-related. Please ask about medical topics, symptoms, treatments, or health information.";

/// Message for health queries where the search found nothing.
pub const NO_RESULTS_MESSAGE: &str = "I couldn't find current information about your query. Please try rephrasing your question.";

/// Disclaimer attached to every answered query.
pub const DISCLAIMER: &str = "This information is for educational purposes only and should not replace professional medical advice. Always consult with a healthcare provider for medical concerns.";

/// Only this many leading results are considered for page extraction.
pub const EXTRACTION_CANDIDATES: usize = 3;

/// Number of sources returned to callers.
pub const RETURNED_SOURCES: usize = 5;

/// Extracted content is cut to this many characters per source.
pub const DETAILED_CONTENT_CHARS: usize = 500;

/// Stateless health question answering service.
///
/// Constructed once at startup and shared behind an `Arc`; every call
/// depends only on its input and the injected collaborators.
#[derive(Clone)]
pub struct HealthSearch {
    searcher: WebSearcher,
    extractor: ContentExtractor,
    max_results: usize,
}

impl HealthSearch {
    /// Create a service over explicit collaborators.
    pub fn new(provider: Arc<dyn SearchProvider>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            searcher: WebSearcher::new(provider),
            extractor: ContentExtractor::new(fetcher),
            max_results: SearchConfig::default().max_results,
        }
    }

    /// Create the production service: DuckDuckGo search and reqwest page fetches.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SearchError::Config`] if `config` is invalid, or
    /// [`crate::SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let provider = Arc::new(DuckDuckGoProvider::new(config));
        let fetcher = Arc::new(HttpPageFetcher::new(config)?);
        Ok(Self::new(provider, fetcher).with_max_results(config.max_results))
    }

    /// Override how many candidates are requested from the provider.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Whether `query` is in scope.
    pub fn is_healthcare_query(&self, query: &str) -> bool {
        is_healthcare_query(query)
    }

    /// Answer a free-text health question.
    pub async fn process_query(&self, query: &str) -> HealthcareQueryResult {
        if !is_healthcare_query(query) {
            tracing::debug!("query out of scope");
            return HealthcareQueryResult::out_of_scope(OUT_OF_SCOPE_MESSAGE);
        }

        let results = match self.searcher.search(query, self.max_results).await {
            Outcome::Ready(results) => results,
            outcome => {
                tracing::debug!(degraded = outcome.is_degraded(), "no search results");
                return HealthcareQueryResult::no_results(NO_RESULTS_MESSAGE);
            }
        };

        let detailed_info = self.collect_detailed_info(&results).await;
        let response = compose_response(query, &results, &detailed_info);

        tracing::debug!(
            sources = results.len(),
            detailed = detailed_info.len(),
            "query answered"
        );

        HealthcareQueryResult {
            is_healthcare_related: true,
            query: Some(query.to_owned()),
            response: Some(response),
            sources: Some(results.into_iter().take(RETURNED_SOURCES).collect()),
            detailed_info: Some(detailed_info),
            disclaimer: Some(DISCLAIMER.to_owned()),
            message: None,
        }
    }

    /// Extract content from the trusted results among the first
    /// [`EXTRACTION_CANDIDATES`], in candidate order.
    async fn collect_detailed_info(&self, results: &[SearchResult]) -> Vec<DetailedInfo> {
        let candidates: Vec<&SearchResult> = results
            .iter()
            .take(EXTRACTION_CANDIDATES)
            .filter(|r| r.is_trusted_source)
            .collect();

        let extractions = futures::future::join_all(
            candidates
                .iter()
                .map(|candidate| self.extractor.extract(&candidate.url)),
        )
        .await;

        candidates
            .into_iter()
            .zip(extractions)
            .filter_map(|(candidate, outcome)| {
                outcome.ready().map(|content| DetailedInfo {
                    source: candidate.domain.clone(),
                    title: candidate.title.clone(),
                    url: candidate.url.clone(),
                    content: truncate_chars(&content, DETAILED_CONTENT_CHARS),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::types::RawSearchHit;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedProvider {
        hits: Vec<RawSearchHit>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchProvider for CannedProvider {
        async fn search(
            &self,
            _query: &str,
            max_results: usize,
        ) -> std::result::Result<Vec<RawSearchHit>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.hits.iter().take(max_results).cloned().collect())
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    struct LongPageFetcher;

    #[async_trait]
    impl PageFetcher for LongPageFetcher {
        async fn fetch(&self, _url: &str) -> std::result::Result<String, SearchError> {
            Ok(format!("<article>{}</article>", "Sentence. ".repeat(300)))
        }
    }

    fn hit(url: &str) -> RawSearchHit {
        RawSearchHit {
            title: format!("Title {url}"),
            url: url.to_owned(),
            snippet: "snippet".to_owned(),
        }
    }

    #[tokio::test]
    async fn only_top_three_trusted_results_are_extracted() {
        let provider = Arc::new(CannedProvider {
            hits: vec![
                hit("https://a.cdc.gov/1"),
                hit("https://b.cdc.gov/2"),
                hit("https://example.com/3"),
                hit("https://c.cdc.gov/4"),
                hit("https://d.cdc.gov/5"),
            ],
            calls: AtomicUsize::new(0),
        });
        let service = HealthSearch::new(provider, Arc::new(LongPageFetcher));
        let result = service.process_query("flu treatment").await;

        let detailed = result.detailed_info.expect("detailed info");
        // Trusted results are ranked first, so the top three are all trusted.
        let sources: Vec<&str> = detailed.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, ["a.cdc.gov", "b.cdc.gov", "c.cdc.gov"]);
        assert!(detailed
            .iter()
            .all(|d| d.content.chars().count() <= DETAILED_CONTENT_CHARS));
        assert_eq!(result.sources.expect("sources").len(), RETURNED_SOURCES);
    }

    #[tokio::test]
    async fn max_results_forwarded_to_provider() {
        let provider = Arc::new(CannedProvider {
            hits: (0..10).map(|i| hit(&format!("https://site{i}.example"))).collect(),
            calls: AtomicUsize::new(0),
        });
        let service =
            HealthSearch::new(provider.clone(), Arc::new(LongPageFetcher)).with_max_results(2);
        let result = service.process_query("fever").await;
        assert_eq!(result.sources.expect("sources").len(), 2);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(HealthSearch::from_config(&config).is_err());
    }

    #[test]
    fn from_config_builds_production_service() {
        assert!(HealthSearch::from_config(&SearchConfig::default()).is_ok());
    }
}
