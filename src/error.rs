//! Error types for the HTTP service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Top-level error type for the healthcare search service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the search pipeline (only raised while constructing it).
    #[error("search error: {0}")]
    Search(#[from] health_search::SearchError),

    /// The listener could not bind.
    #[error("bind error: {0}")]
    Bind(String),

    /// A worker pool job exceeded its deadline.
    #[error("query timed out after {0}s")]
    WorkerTimeout(u64),

    /// A worker pool job panicked or the pool was closed.
    #[error("worker failed: {0}")]
    WorkerFailed(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServiceError>;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
