//! Trait definition for pluggable search providers.
//!
//! The pipeline only needs `{title, url, snippet}` tuples for a text query.
//! [`crate::engines::DuckDuckGoProvider`] is the production implementation;
//! tests substitute canned providers.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::RawSearchHit;

/// A web search backend.
///
/// Implementors handle their own URL construction, HTTP transport and
/// response parsing. Errors are returned to the caller, which decides how
/// to degrade; implementations must not retry.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query` and return at most `max_results` hits in engine order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, times out, or the
    /// response cannot be parsed.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchHit>, SearchError>;

    /// Human-readable provider name, used in log fields.
    fn name(&self) -> &'static str;
}
