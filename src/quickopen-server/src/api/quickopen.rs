//! Quick-open scan endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum_extra::extract::{Query, QueryRejection};
use quickopen_scan::{ScanOutcome, scan};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::types::QuickOpenQuery;

/// Scan the tree under the root and return matching files grouped by
/// directory.
pub async fn quick_open(
    State(state): State<Arc<AppState>>,
    query: Result<Query<QuickOpenQuery>, QueryRejection>,
) -> AppResult<Json<ScanOutcome>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.to_string()))?;
    debug!("Quick-open request: {:?}", query);

    let request =
        query.into_request(state.config.default_max_load, state.config.unreadable_dirs);
    let policy = Arc::clone(&state.policy);

    let outcome = tokio::task::spawn_blocking(move || scan(&request, policy.as_ref()))
        .await
        .map_err(|e| AppError::Internal(format!("Scan task failed: {e}")))??;

    Ok(Json(outcome))
}
