//! Berlin transport HTTP Server
//!
//! Main entry point for the departure board API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, TransitAdapter, init_logging};
use presentation_http::{
    routes,
    shutdown::{shutdown_signal, with_shutdown_deadline},
    spawn_board_refresh_task,
    state::AppState,
};
use tokio::{net::TcpListener, sync::Notify};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.logging)?;
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    run(config).await
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Berlin transport v{} starting...", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        base_url = %config.transit.base_url,
        boards = config.stops.len(),
        "Configuration loaded"
    );

    if config.stops.is_empty() {
        warn!("No [[stops]] configured, the board list will be empty");
    }

    // Initialize the departures API adapter
    let adapter = Arc::new(
        TransitAdapter::from_config(&config.transit)
            .map_err(|e| anyhow::anyhow!("Failed to initialize transit client: {e}"))?,
    );

    let addr = config.server.bind_address();
    let cors_layer = cors_layer(&config.server.allowed_origins, config.server.cors_enabled);
    let interval = Duration::from_secs(config.polling.interval_secs);
    let refresh_on_startup = config.polling.refresh_on_startup;
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let state = AppState::new(config, adapter.clone(), adapter);

    // One refresh task per board
    let tasks: Vec<_> = state
        .boards
        .iter()
        .map(|board| spawn_board_refresh_task(Arc::clone(board), interval, refresh_on_startup))
        .collect();

    // Build router
    let app = routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer),
    );

    // Start server
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let draining = Arc::new(Notify::new());
    let signal = {
        let draining = Arc::clone(&draining);
        async move {
            shutdown_signal().await;
            draining.notify_one();
        }
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();
    if let Some(result) = with_shutdown_deadline(server, &draining, shutdown_timeout).await {
        result?;
    }

    for task in tasks {
        task.abort();
    }

    info!("Server shutdown complete");

    Ok(())
}

/// CORS policy: permissive without configured origins, restricted otherwise
fn cors_layer(allowed_origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        return CorsLayer::new();
    }

    if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}
