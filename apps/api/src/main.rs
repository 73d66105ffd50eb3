mod analysis;
mod bookmarks;
mod config;
mod errors;
mod export;
mod models;
mod routes;
mod search;
mod state;
mod tracker;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::bookmarks::store::{InMemoryKvStore, KeyValueStore, RedisKvStore};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Bookmark storage: Redis when configured, process memory otherwise
    let kv: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => {
            info!("Bookmark storage: Redis");
            Arc::new(RedisKvStore::open(url)?)
        }
        None => {
            info!("Bookmark storage: in-memory");
            Arc::new(InMemoryKvStore::new())
        }
    };

    info!(
        "Analyzer min length {} chars, search debounce {}ms",
        config.min_resume_chars, config.search_debounce_ms
    );

    let state = AppState::build(config.clone(), kv).await;

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
