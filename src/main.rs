//! Standings web server: serves the page, proxies ESPN standings and builds
//! the Excel export.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use puan_tablosu::api::{ServerState, router};
use puan_tablosu::config::Config;
use puan_tablosu::http_client::http_client;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,puan_tablosu=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = ServerState {
        client: http_client()?.clone(),
        config: Arc::new(config.clone()),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(
        addr = %config.bind_addr,
        upstream = %config.espn_base_url,
        "puan_tablosu listening"
    );

    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}
