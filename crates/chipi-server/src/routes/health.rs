//! Health check endpoint.

use axum::Json;
use serde::Serialize;

use super::ResponseStatus;

/// Service identity reported by the health check.
pub const SERVICE_NAME: &str = "Chipi AI Server";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ResponseStatus,
    pub service: String,
    pub timestamp: String,
    pub version: String,
}

/// Health check endpoint.
/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: ResponseStatus::Healthy,
        service: SERVICE_NAME.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
