//! Route definitions for the REST API.

mod categories;
mod data;
mod docs;
mod health;
mod patterns;
mod responses;
mod stats;

use axum::{
    body::Bytes,
    extract::rejection::PathRejection,
    routing::{delete, get, post, put},
    Router,
};
use chipi_core::{ChipiResult, TrainingData};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Value of the `status` field in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
    Healthy,
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Reads
        .route(
            "/api/data",
            get(data::get_training_data).fallback(method_not_allowed),
        )
        .route(
            "/api/data/:category",
            get(data::get_category).fallback(method_not_allowed),
        )
        // Responses and patterns
        .route(
            "/api/data/add-response/:category",
            post(responses::add_response).fallback(method_not_allowed),
        )
        .route(
            "/api/data/add-pattern/:category",
            post(patterns::add_pattern).fallback(method_not_allowed),
        )
        .route(
            "/api/data/update-response/:category/:index",
            put(responses::update_response).fallback(method_not_allowed),
        )
        .route(
            "/api/data/delete-response/:category/:index",
            delete(responses::delete_response).fallback(method_not_allowed),
        )
        // Categories
        // Static segments shadow `:category`, so they also serve its GET.
        .route(
            "/api/data/create-category",
            post(categories::create_category)
                .get(data::get_shadowed_category)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/data/delete-category/:category",
            delete(categories::delete_category).fallback(method_not_allowed),
        )
        .route(
            "/api/data/reset",
            post(data::reset_data)
                .get(data::get_shadowed_category)
                .fallback(method_not_allowed),
        )
        // Service info
        .route(
            "/api/stats",
            get(stats::get_stats).fallback(method_not_allowed),
        )
        .route(
            "/api/health",
            get(health::health_check).fallback(method_not_allowed),
        )
        .route(
            "/api/docs",
            get(docs::api_docs).fallback(method_not_allowed),
        )
        .fallback(not_found)
        // Attach state
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Resource not found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}

/// Decode an optional JSON body.
///
/// An empty body decodes as `T::default()` so the handler's own checks
/// decide which field is missing. Anything else must be valid JSON.
pub(crate) fn parse_body<T>(body: &Bytes) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}

/// Decode a body addressed at a category.
///
/// A malformed body is only reported once `lookup` has confirmed that the
/// addressed category (and index) exists, so a 404 still wins over a 400.
pub(crate) async fn parse_body_for<T, F>(
    state: &AppState,
    body: &Bytes,
    lookup: F,
) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
    F: FnOnce(&TrainingData) -> ChipiResult<()>,
{
    match parse_body(body) {
        Ok(request) => Ok(request),
        Err(e) => {
            state.read(lookup).await?;
            Err(e)
        }
    }
}

/// Unmatched path parameters (for example a non-numeric index) are a 404.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::not_found(format!("Resource not found: {}", rejection.body_text()))
    }
}

pub use categories::*;
pub use data::*;
pub use docs::*;
pub use health::*;
pub use patterns::*;
pub use responses::*;
pub use stats::*;
