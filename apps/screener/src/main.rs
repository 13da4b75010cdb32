mod config;
mod embedding;
mod errors;
mod filters;
mod models;
mod retry;
mod routes;
mod screening;
mod settings;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::HttpEmbeddingProvider;
use crate::filters::{register_builtin, FilterRegistry};
use crate::routes::build_router;
use crate::settings::SharedSettings;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener v{}", env!("CARGO_PKG_VERSION"));

    let settings = SharedSettings::new(config.settings.clone());

    // Initialize embedding provider
    let embedder = HttpEmbeddingProvider::new(
        config.embedding_api_url.clone(),
        config.embedding_api_key.clone(),
        config.embedding_timeout,
    )?;
    info!(
        "Embedding provider initialized (url: {}, model: {})",
        config.embedding_api_url, config.settings.embedding_model
    );

    // Register filters once; the registry is read-only from here on
    let mut registry = FilterRegistry::new();
    register_builtin(
        &mut registry,
        Arc::new(settings.clone()),
        Arc::new(embedder),
        config.retry.clone(),
    )?;
    if registry.is_empty() {
        anyhow::bail!("No screening filters registered");
    }
    info!(
        "{} filters registered, retry policy: {:?}",
        registry.len(),
        config.retry
    );

    // Build app state
    let state = AppState {
        registry: Arc::new(registry),
        settings,
        screen_timeout: config.screen_timeout,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
