//! HTTP API for the healthcare search pipeline.
//!
//! ## Endpoints
//!
//! - `GET /health`: liveness check
//! - `POST /search`: run a query and return the full result
//! - `POST /chat`: run a query and return a chat-formatted message
//! - `POST /async-search`: like `/search`, but through the bounded worker pool
//! - `GET /test`: run a canned query end to end
//!
//! Any other path gets a 404 listing the endpoints above.

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use health_search::{HealthSearch, HealthcareQueryResult};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{Result, ServiceError};
use crate::worker_pool::WorkerPool;

/// Query run by `GET /test` and the startup self-test.
pub const SELF_TEST_QUERY: &str = "What are the symptoms of common cold?";

/// Reply sent by `/chat` for questions outside the healthcare domain.
pub const CHAT_REFUSAL: &str = "I can only help with healthcare and medical questions. Please ask about symptoms, treatments, medical conditions, or health information.";

const CHAT_NO_ANSWER: &str = "I could not find information about your query.";
const CHAT_OFF_TOPIC: &str = "Please ask a healthcare-related question.";

/// Human-readable endpoint list returned with every 404.
pub const AVAILABLE_ENDPOINTS: [&str; 5] = [
    "/health - GET - Health check",
    "/search - POST - Search healthcare information",
    "/chat - POST - Chat with healthcare AI",
    "/async-search - POST - Async search",
    "/test - GET - Test AI functionality",
];

/// Number of sources listed under "Sources:" in a chat reply.
const CHAT_SOURCES: usize = 3;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The query pipeline, constructed once at startup.
    pub search: Arc<HealthSearch>,
    /// Workers backing `/async-search`.
    pub pool: WorkerPool,
}

impl AppState {
    pub fn new(search: Arc<HealthSearch>, config: &ServerConfig) -> Self {
        Self {
            search,
            pool: WorkerPool::new(
                config.workers,
                Duration::from_secs(config.worker_timeout_seconds),
            ),
        }
    }
}

/// Build the API router with panic recovery and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/search", post(handle_search))
        .route("/chat", post(handle_chat))
        .route("/async-search", post(handle_async_search))
        .route("/test", get(handle_test))
        .fallback(handle_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// ApiServer
// ---------------------------------------------------------------------------

/// The HTTP API running on a background task.
pub struct ApiServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Start the API server.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(search: Arc<HealthSearch>, config: &ServerConfig) -> Result<Self> {
        let app = router(AppState::new(search, config));
        let listener = bind(config).await?;
        let addr = listener
            .local_addr()
            .map_err(|e| ServiceError::Bind(format!("failed to get local addr: {e}")))?;

        info!("API server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("API server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve the API in the foreground until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(config: &ServerConfig, search: Arc<HealthSearch>) -> Result<()> {
    let app = router(AppState::new(search, config));
    let listener = bind(config).await?;
    if let Ok(addr) = listener.local_addr() {
        info!(workers = config.workers, "healthcare search server listening on http://{addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}

async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let bind_addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServiceError::Bind(format!("{bind_addr}: {e}")))
}

/// Run the canned self-test query and report whether it produced an answer.
///
/// Never fails: a degraded search is logged and reported as `false`.
pub async fn run_self_test(search: &HealthSearch) -> bool {
    let result = search
        .process_query(SELF_TEST_QUERY)
        .instrument(info_span!("self_test"))
        .await;
    let passed = result.is_healthcare_related && result.response.is_some();
    if passed {
        let sources = result.sources.as_ref().map_or(0, Vec::len);
        info!(sources, "self-test passed");
    } else {
        warn!(
            reason = result.message.as_deref().unwrap_or_default(),
            "self-test produced no answer"
        );
    }
    passed
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Current Unix time in seconds, with sub-second precision.
fn unix_timestamp() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Run one query inside a span tagged with a fresh request ID.
async fn run_query(search: &HealthSearch, query: &str) -> HealthcareQueryResult {
    let span = info_span!("health_query", request_id = %Uuid::new_v4());
    search.process_query(query).instrument(span).await
}

fn search_payload(result: HealthcareQueryResult) -> Response {
    Json(json!({
        "success": true,
        "data": result,
        "timestamp": unix_timestamp(),
    }))
    .into_response()
}

/// Render a query result as a single chat message.
///
/// The answer is followed by the disclaimer and a numbered list of the
/// first three sources, each section only when present.
pub fn format_chat_message(result: &HealthcareQueryResult) -> String {
    let mut message = result
        .response
        .as_deref()
        .or(result.message.as_deref())
        .unwrap_or(CHAT_NO_ANSWER)
        .to_owned();

    if let Some(disclaimer) = result.disclaimer.as_deref().filter(|d| !d.is_empty()) {
        message.push_str(&format!("\n\n⚠️ {disclaimer}"));
    }

    if let Some(sources) = result.sources.as_deref().filter(|s| !s.is_empty()) {
        message.push_str("\n\n📚 Sources:");
        for (i, source) in sources.iter().take(CHAT_SOURCES).enumerate() {
            message.push_str(&format!("\n{}. {} ({})", i + 1, source.title, source.domain));
        }
    }
    message
}

/// Query text of `/chat`: the first of `message`, `query`, `content` present.
fn chat_text(body: &Value) -> Option<String> {
    ["message", "query", "content"]
        .iter()
        .find_map(|key| body.get(key))
        .map(|value| value.as_str().unwrap_or_default().to_owned())
}

/// A body that carries nothing: absent, unparseable, `null`, or `{}`.
fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /health`
async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "Healthcare Search AI",
        "timestamp": unix_timestamp(),
    }))
}

/// `POST /search`
async fn handle_search(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let Some(query) = body
        .ok()
        .and_then(|Json(body)| body.get("query").and_then(Value::as_str).map(str::to_owned))
    else {
        return bad_request("Missing 'query' in request body");
    };
    let query = query.trim();
    if query.is_empty() {
        return bad_request("Query cannot be empty");
    }

    search_payload(run_query(&state.search, query).await)
}

/// `POST /chat`
async fn handle_chat(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) if !is_empty_body(&body) => body,
        _ => return bad_request("No data provided"),
    };
    let Some(message) = chat_text(&body) else {
        return bad_request("No message/query found");
    };

    if !state.search.is_healthcare_query(&message) {
        return Json(json!({
            "success": false,
            "message": CHAT_REFUSAL,
            "is_healthcare_related": false,
        }))
        .into_response();
    }

    let result = run_query(&state.search, &message).await;
    if !result.is_healthcare_related {
        return Json(json!({
            "success": false,
            "message": result.message.as_deref().unwrap_or(CHAT_OFF_TOPIC),
            "is_healthcare_related": false,
        }))
        .into_response();
    }

    let reply = format_chat_message(&result);
    Json(json!({
        "success": true,
        "message": reply,
        "sources": result.sources.unwrap_or_default(),
        "is_healthcare_related": true,
        "detailed_info": result.detailed_info.unwrap_or_default(),
    }))
    .into_response()
}

/// `POST /async-search`
async fn handle_async_search(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let query = body
        .ok()
        .and_then(|Json(body)| body.get("query").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_default();
    let query = query.trim().to_owned();
    if query.is_empty() {
        return bad_request("Query is required");
    }

    let search = Arc::clone(&state.search);
    let job = async move { run_query(&search, &query).await };
    match state.pool.run(job).await {
        Ok(result) => search_payload(result),
        Err(e) => e.into_response(),
    }
}

/// `GET /test`
async fn handle_test(State(state): State<AppState>) -> Json<Value> {
    let result = run_query(&state.search, SELF_TEST_QUERY).await;
    Json(json!({
        "test_query": SELF_TEST_QUERY,
        "result": result,
        "status": "AI is working properly",
    }))
}

async fn handle_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
        .into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error",
            "message": "Something went wrong on our end",
        })),
    )
        .into_response()
}
