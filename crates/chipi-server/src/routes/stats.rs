//! Statistics endpoint.

use axum::{extract::State, Json};
use chipi_core::TrainingStats;
use serde::Serialize;

use super::ResponseStatus;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub status: ResponseStatus,
    #[serde(flatten)]
    pub stats: TrainingStats,
}

/// Totals across all categories.
/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.read(|data| data.stats()).await;

    Json(StatsResponse {
        status: ResponseStatus::Success,
        stats,
    })
}
