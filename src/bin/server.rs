//! Healthcare search HTTP server.
//!
//! Reads `$HEALTHSEARCH_CONFIG` or `~/.config/healthsearch/config.toml`
//! (defaults if neither exists) and serves until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use health_search::HealthSearch;
use healthsearch::{ServiceConfig, run_self_test, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("healthsearch=info,health_search=info")
            }),
        )
        .init();

    let config = ServiceConfig::load().context("loading configuration")?;
    tracing::info!(
        bind = %config.bind_addr(),
        workers = config.server.workers,
        "healthcare search server starting"
    );

    let search = Arc::new(
        HealthSearch::from_config(&config.search).context("building search pipeline")?,
    );

    if config.server.self_test_on_start {
        run_self_test(&search).await;
    }

    serve(&config.server, search).await?;
    tracing::info!("healthcare search server stopped");
    Ok(())
}
