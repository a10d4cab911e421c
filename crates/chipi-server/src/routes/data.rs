//! Whole-mapping endpoints: list, single category, reset.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    Json,
};
use chipi_core::{Category, TrainingData};
use serde::Serialize;
use tracing::info;

use super::ResponseStatus;
use crate::error::ApiResult;
use crate::state::AppState;

/// Response for listing all training data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDataResponse {
    pub status: ResponseStatus,
    pub data: TrainingData,
    pub timestamp: String,
    pub categories: Vec<String>,
    pub total_categories: usize,
}

/// Get all training data.
/// GET /api/data
pub async fn get_training_data(State(state): State<AppState>) -> Json<TrainingDataResponse> {
    let data = state.snapshot().await;

    Json(TrainingDataResponse {
        status: ResponseStatus::Success,
        categories: data.category_names(),
        total_categories: data.len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        data,
    })
}

/// Response for a single category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub status: ResponseStatus,
    pub category: String,
    pub data: Category,
}

/// Get a specific category.
/// GET /api/data/:category
pub async fn get_category(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<CategoryResponse>> {
    let Path(name) = path?;
    category_response(&state, name).await
}

/// Get a category whose name equals a static route segment
/// (`reset`, `create-category`).
/// GET /api/data/reset, GET /api/data/create-category
pub async fn get_shadowed_category(
    State(state): State<AppState>,
    uri: Uri,
) -> ApiResult<Json<CategoryResponse>> {
    let name = uri.path().rsplit('/').next().unwrap_or_default();
    category_response(&state, name.to_string()).await
}

async fn category_response(
    state: &AppState,
    name: String,
) -> ApiResult<Json<CategoryResponse>> {
    let category = state
        .read(|data| data.category(&name).cloned())
        .await?;

    Ok(Json(CategoryResponse {
        status: ResponseStatus::Success,
        category: name,
        data: category,
    }))
}

/// Envelope carrying only a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
        }
    }
}

/// Reset to the default training data.
/// POST /api/data/reset
pub async fn reset_data(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    state.reset().await?;
    info!("Training data reset to default");

    Ok(Json(MessageResponse::success(
        "Training data reset to default",
    )))
}
