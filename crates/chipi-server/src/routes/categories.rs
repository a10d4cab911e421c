//! Category endpoints: create and delete.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_body, MessageResponse, ResponseStatus};
use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for creating a category.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// Response for creating a category.
#[derive(Debug, Serialize)]
pub struct CreateCategoryResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub category: String,
}

/// Create a new category.
/// POST /api/data/create-category
pub async fn create_category(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<CreateCategoryResponse>> {
    let request = parse_body::<CreateCategoryRequest>(&body)?;
    let name = request.name.unwrap_or_default();

    state
        .mutate(|data| data.create_category(&name, request.patterns, request.responses))
        .await?;
    info!(category = %name, "Category created");

    Ok(Json(CreateCategoryResponse {
        status: ResponseStatus::Success,
        message: format!("Category {} created", name),
        category: name,
    }))
}

/// Delete an entire category. Core categories are refused.
/// DELETE /api/data/delete-category/:category
pub async fn delete_category(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(category) = path?;

    state.mutate(|data| data.delete_category(&category)).await?;
    info!(category = %category, "Category deleted");

    Ok(Json(MessageResponse::success(format!(
        "Category {} deleted",
        category
    ))))
}
