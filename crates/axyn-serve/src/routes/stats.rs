//! Submission statistics for site operators.

use axum::Json;
use axum::extract::State;
use axyn_core::{StoreError, SubmissionStats};
use serde::Serialize;
use tokio::time::timeout;

use crate::error::ApiError;
use crate::state::AppState;

/// Stats response.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: SubmissionStats,
}

/// `GET /api/stats`
///
/// Returns counts of all submissions, per status, and created today.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let bound = state.intake.timeouts().persistence;
    let stats = timeout(bound, state.intake.store().stats())
        .await
        .unwrap_or(Err(StoreError::Timeout(bound)))
        .map_err(ApiError::Stats)?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
