// covidmap entry point.
// Starts the HTTP server that serves the Canada and world dashboard pages.

mod api;
mod cache;
mod chart;
mod config;
mod error;
mod geo;
mod web;

use std::sync::Arc;

use tracing::info;

use crate::api::CovidClient;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let addr = config.addr;

    let state = Arc::new(AppState {
        client: CovidClient::new()?,
        cache: CacheStore::new(config.cache_dir.clone()),
        config,
    });

    let app = web::router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
