//! Trust-ranked web search over a pluggable provider.
//!
//! Every query is qualified with [`QUERY_QUALIFIER`] before it reaches the
//! provider, then each hit is scored by whether its domain is on the
//! trusted medical source list:
//!
//! ```text
//! relevance_score = 1.0  if trusted
//!                   0.5  otherwise
//! ```
//!
//! Results are stable-sorted by score, so trusted sources move to the front
//! while keeping the engine's order within each group.

use std::sync::Arc;

use crate::domain::{extract_domain, is_trusted_domain};
use crate::provider::SearchProvider;
use crate::types::{Outcome, RawSearchHit, SearchResult};

/// Appended to every query to steer the engine toward medical pages.
pub const QUERY_QUALIFIER: &str = "medical health information";

/// Score assigned to results from trusted medical domains.
pub const TRUSTED_SCORE: f64 = 1.0;

/// Score assigned to every other result.
pub const UNTRUSTED_SCORE: f64 = 0.5;

/// Runs qualified searches and ranks hits by source trust.
#[derive(Clone)]
pub struct WebSearcher {
    provider: Arc<dyn SearchProvider>,
}

impl WebSearcher {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Search for `query` and return up to `max_results` ranked results.
    ///
    /// Provider failures are logged and returned as [`Outcome::Degraded`];
    /// a successful search with no hits is [`Outcome::Empty`].
    pub async fn search(&self, query: &str, max_results: usize) -> Outcome<Vec<SearchResult>> {
        let qualified = qualify_query(query);
        tracing::trace!(query = %qualified, provider = self.provider.name(), "web search");

        match self.provider.search(&qualified, max_results).await {
            Ok(hits) if hits.is_empty() => {
                tracing::debug!(provider = self.provider.name(), "search returned no hits");
                Outcome::Empty
            }
            Ok(hits) => {
                let results = rank_hits(hits);
                tracing::debug!(
                    count = results.len(),
                    trusted = results.iter().filter(|r| r.is_trusted_source).count(),
                    "search results ranked"
                );
                Outcome::Ready(results)
            }
            Err(err) => {
                tracing::warn!(provider = self.provider.name(), error = %err, "search provider failed");
                Outcome::Degraded(err.to_string())
            }
        }
    }
}

/// Append the medical qualifier to a raw query.
pub fn qualify_query(query: &str) -> String {
    format!("{query} {QUERY_QUALIFIER}")
}

/// Annotate hits with domain and trust, then stable-sort by score descending.
pub fn rank_hits(hits: Vec<RawSearchHit>) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = hits.into_iter().map(score_hit).collect();
    // `sort_by` is stable: equal scores keep engine order.
    results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    results
}

fn score_hit(hit: RawSearchHit) -> SearchResult {
    let domain = extract_domain(&hit.url);
    let is_trusted_source = is_trusted_domain(&domain);
    SearchResult {
        title: hit.title,
        url: hit.url,
        snippet: hit.snippet,
        domain,
        is_trusted_source,
        relevance_score: if is_trusted_source {
            TRUSTED_SCORE
        } else {
            UNTRUSTED_SCORE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn hit(url: &str) -> RawSearchHit {
        RawSearchHit {
            title: format!("Title for {url}"),
            url: url.to_owned(),
            snippet: format!("Snippet for {url}"),
        }
    }

    struct RecordingProvider {
        hits: Result<Vec<RawSearchHit>, String>,
        seen: Mutex<Vec<(String, usize)>>,
    }

    impl RecordingProvider {
        fn returning(hits: Vec<RawSearchHit>) -> Self {
            Self {
                hits: Ok(hits),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                hits: Err(reason.to_owned()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchProvider for RecordingProvider {
        async fn search(
            &self,
            query: &str,
            max_results: usize,
        ) -> Result<Vec<RawSearchHit>, SearchError> {
            self.seen
                .lock()
                .expect("lock")
                .push((query.to_owned(), max_results));
            self.hits.clone().map_err(SearchError::Http)
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[test]
    fn qualifier_appended() {
        assert_eq!(
            qualify_query("flu shots"),
            "flu shots medical health information"
        );
    }

    #[test]
    fn trusted_results_move_to_front_stably() {
        let results = rank_hits(vec![
            hit("https://blog.example.com/a"),
            hit("https://www.cdc.gov/flu"),
            hit("https://forum.example.org/b"),
            hit("https://www.mayoclinic.org/flu"),
        ]);
        let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://www.cdc.gov/flu",
                "https://www.mayoclinic.org/flu",
                "https://blog.example.com/a",
                "https://forum.example.org/b",
            ]
        );
    }

    #[test]
    fn scores_follow_trust() {
        let results = rank_hits(vec![
            hit("https://www.webmd.com/x"),
            hit("https://example.com/y"),
            hit("not a url"),
        ]);
        for r in &results {
            let expected = if r.is_trusted_source {
                TRUSTED_SCORE
            } else {
                UNTRUSTED_SCORE
            };
            assert!((r.relevance_score - expected).abs() < f64::EPSILON);
        }
        for pair in results.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        let malformed = results.iter().find(|r| r.url == "not a url").expect("kept");
        assert!(malformed.domain.is_empty());
        assert!(!malformed.is_trusted_source);
    }

    #[tokio::test]
    async fn provider_receives_qualified_query_and_limit() {
        let provider = Arc::new(RecordingProvider::returning(vec![hit("https://nih.gov/a")]));
        let searcher = WebSearcher::new(provider.clone());
        let outcome = searcher.search("fever", 8).await;
        assert!(matches!(outcome, Outcome::Ready(ref r) if r.len() == 1));
        let seen = provider.seen.lock().expect("lock");
        assert_eq!(
            seen.as_slice(),
            [("fever medical health information".to_owned(), 8)]
        );
    }

    #[tokio::test]
    async fn empty_and_failed_searches_are_distinguishable() {
        let empty = WebSearcher::new(Arc::new(RecordingProvider::returning(vec![])));
        assert_eq!(empty.search("fever", 8).await, Outcome::Empty);

        let failing = WebSearcher::new(Arc::new(RecordingProvider::failing("rate limited")));
        match failing.search("fever", 8).await {
            Outcome::Degraded(reason) => assert!(reason.contains("rate limited")),
            other => panic!("expected degraded outcome, got {other:?}"),
        }
    }
}
