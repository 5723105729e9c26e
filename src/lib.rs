//! Healthcare search service: an HTTP front end for [`health_search`].
//!
//! The pipeline itself (classification, web search, page extraction and
//! answer composition) lives in the `health-search` crate. This crate adds
//! the pieces needed to run it as a long-lived service:
//!
//! - **Config**: TOML file with `[server]` and `[search]` sections
//! - **Server**: axum routes for search, chat, health and self-test
//! - **Worker pool**: bounded concurrency with a hard deadline for
//!   `/async-search`

pub mod config;
pub mod error;
pub mod server;
pub mod worker_pool;

pub use config::{ServerConfig, ServiceConfig};
pub use error::{Result, ServiceError};
pub use server::{ApiServer, AppState, router, run_self_test, serve};
pub use worker_pool::WorkerPool;
