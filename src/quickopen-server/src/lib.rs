//! Quick-open server - HTTP endpoint for fuzzy file finding.
//!
//! This crate provides:
//! - `GET /api/quickopen`, a bounded scan of the served tree
//! - `GET /api/health`, an anonymous liveness check
//! - Optional token authentication for scan requests

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::{AuthConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Run the server with the given configuration.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    run_with_shutdown(config, std::future::pending()).await
}

/// Run the server with graceful shutdown support.
pub async fn run_with_shutdown<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    if !config.auth.enabled {
        warn!("Server running without authentication!");
        warn!("Set QUICKOPEN_TOKEN or auth.tokens to require a token.");
    } else if config.auth.tokens.is_empty() {
        warn!("Authentication is enabled but no tokens are configured; every scan will be rejected");
    }

    let state = Arc::new(AppState::new(config.clone())?);
    info!("Serving files under {}", state.policy.root_dir().display());
    let app = create_router_with_state(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Starting quick-open server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    create_router_with_state(Arc::new(state))
}

/// Create the application router with an Arc-wrapped state.
pub fn create_router_with_state(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api::routes(Arc::clone(&state)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
