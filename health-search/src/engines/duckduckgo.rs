//! DuckDuckGo search provider, keyless and scraper-friendly.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and tolerates automated requests.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::RawSearchHit;

/// DuckDuckGo HTML search scraper.
///
/// A fresh client (and User-Agent) is built per query; the endpoint is
/// rate-limited by DuckDuckGo itself and nothing here retries.
pub struct DuckDuckGoProvider {
    endpoint: String,
    safe_search: bool,
    timeout: Duration,
    user_agent: Option<String>,
}

impl DuckDuckGoProvider {
    /// Create a provider from the search section of the configuration.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            endpoint: config.base_url.clone(),
            safe_search: config.safe_search,
            timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchHit>, SearchError> {
        tracing::trace!(query, "DuckDuckGo search");

        let client = http::build_client(self.timeout, self.user_agent.as_deref())?;

        let mut params = vec![("q", query)];
        if self.safe_search {
            params.push(("kp", "1"));
        }

        let response = client
            .post(&self.endpoint)
            .form(&params)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(e, "DuckDuckGo request failed"))?
            .error_for_status()
            .map_err(|e| SearchError::from_reqwest(e, "DuckDuckGo HTTP error"))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(e, "DuckDuckGo response read failed"))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_duckduckgo_html(&html, max_results)
    }

    fn name(&self) -> &'static str {
        "DuckDuckGo"
    }
}

/// Parse a DuckDuckGo HTML response into raw hits, skipping ads.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<RawSearchHit>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut hits = Vec::new();

    for element in document.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }

        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let Some(url) = title_el
            .value()
            .attr("href")
            .and_then(DuckDuckGoProvider::extract_url)
        else {
            continue;
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(RawSearchHit {
            title,
            url,
            snippet,
        });
    }

    tracing::debug!(count = hits.len(), "DuckDuckGo results parsed");
    Ok(hits)
}
