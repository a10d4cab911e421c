//! Pattern endpoint.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_body_for, ResponseStatus};
use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for adding a pattern.
#[derive(Debug, Default, Deserialize)]
pub struct AddPatternRequest {
    pub pattern: Option<String>,
}

/// Response for adding a pattern.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPatternResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub category: String,
    pub total_patterns: usize,
}

/// Add a new pattern to a category, rejecting duplicates.
/// POST /api/data/add-pattern/:category
pub async fn add_pattern(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<AddPatternResponse>> {
    let Path(category) = path?;
    let pattern = parse_body_for::<AddPatternRequest, _>(&state, &body, |data| {
        data.category(&category).map(|_| ())
    })
    .await?
    .pattern
    .unwrap_or_default();

    let total_patterns = state
        .mutate(|data| data.add_pattern(&category, &pattern))
        .await?;
    info!(category = %category, total_patterns, "Pattern added");

    Ok(Json(AddPatternResponse {
        status: ResponseStatus::Success,
        message: format!("Pattern added to {}", category),
        category,
        total_patterns,
    }))
}
