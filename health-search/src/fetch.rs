//! Page fetching for content extraction.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;

/// Downloads the HTML body of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body as text.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Timeout`] when the fixed timeout elapses,
    /// [`SearchError::Status`] for non-2xx responses, and
    /// [`SearchError::Http`] for any other transport failure.
    async fn fetch(&self, url: &str) -> Result<String, SearchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
///
/// The client carries a browser-like User-Agent and the page timeout
/// from [`SearchConfig::page_timeout_seconds`].
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Build a fetcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = http::build_client(
            Duration::from_secs(config.page_timeout_seconds),
            config.user_agent.as_deref(),
        )?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(e, "page request failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(e, "page body read failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(page_timeout_seconds: u64) -> HttpPageFetcher {
        HttpPageFetcher::new(&SearchConfig {
            page_timeout_seconds,
            ..Default::default()
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn fetches_body_with_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flu"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>Flu facts</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetcher(10)
            .fetch(&format!("{}/flu", server.uri()))
            .await
            .expect("fetch should succeed");
        assert_eq!(body, "<p>Flu facts</p>");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = fetcher(10).fetch(&url).await.unwrap_err();
        match err {
            SearchError::Status { status, url: failed } => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<p>late</p>")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = fetcher(1)
            .fetch(&format!("{}/slow", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Timeout(_)), "got {err:?}");
    }
}
