//! REST API routes and handlers.

mod health;
mod quickopen;
pub mod types;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};

use crate::auth::auth_middleware;
use crate::state::AppState;

pub use types::{HealthResponse, QuickOpenQuery};

/// Create the API routes.
///
/// The health check stays reachable without a token.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/quickopen", get(quickopen::quick_open))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(protected)
}
