//! Response endpoints: add, update, delete by index.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use chipi_core::ChipiError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_body_for, ResponseStatus};
use crate::error::ApiResult;
use crate::state::AppState;

/// Request body carrying a response text.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseTextRequest {
    pub response: Option<String>,
}

impl ResponseTextRequest {
    fn text(self) -> String {
        self.response.unwrap_or_default()
    }
}

/// Response for adding a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResponseResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub category: String,
    pub total_responses: usize,
}

/// Add a new response to a category.
/// POST /api/data/add-response/:category
pub async fn add_response(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<AddResponseResponse>> {
    let Path(category) = path?;
    let text = parse_body_for::<ResponseTextRequest, _>(&state, &body, |data| {
        data.category(&category).map(|_| ())
    })
    .await?
    .text();

    let total_responses = state
        .mutate(|data| data.add_response(&category, &text))
        .await?;
    info!(category = %category, total_responses, "Response added");

    Ok(Json(AddResponseResponse {
        status: ResponseStatus::Success,
        message: format!("Response added to {}", category),
        category,
        total_responses,
    }))
}

/// Response for updating a response.
#[derive(Debug, Serialize)]
pub struct UpdateResponseResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub category: String,
    pub index: usize,
}

/// Replace the response at an index.
/// PUT /api/data/update-response/:category/:index
pub async fn update_response(
    State(state): State<AppState>,
    path: Result<Path<(String, usize)>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<UpdateResponseResponse>> {
    let Path((category, index)) = path?;
    let text = parse_body_for::<ResponseTextRequest, _>(&state, &body, |data| {
        if index >= data.category(&category)?.responses.len() {
            return Err(ChipiError::index_out_of_range());
        }
        Ok(())
    })
    .await?
    .text();

    state
        .mutate(|data| data.update_response(&category, index, &text))
        .await?;
    info!(category = %category, index, "Response updated");

    Ok(Json(UpdateResponseResponse {
        status: ResponseStatus::Success,
        message: format!("Response updated in {}", category),
        category,
        index,
    }))
}

/// Response for deleting a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponseResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub category: String,
    pub deleted_response: String,
}

/// Delete the response at an index.
/// DELETE /api/data/delete-response/:category/:index
pub async fn delete_response(
    State(state): State<AppState>,
    path: Result<Path<(String, usize)>, PathRejection>,
) -> ApiResult<Json<DeleteResponseResponse>> {
    let Path((category, index)) = path?;

    let deleted_response = state
        .mutate(|data| data.delete_response(&category, index))
        .await?;
    info!(category = %category, index, "Response deleted");

    Ok(Json(DeleteResponseResponse {
        status: ResponseStatus::Success,
        message: "Response deleted".to_string(),
        category,
        deleted_response,
    }))
}
