//! chipi-server - REST API server for chipi training data.
//!
//! Exposes CRUD endpoints over the category mapping held in [`AppState`].
//! Every mutation is persisted before its response is sent.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use chipi_core::JsonFileStore;
//! use chipi_server::{create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(JsonFileStore::new("training_data.json"));
//!     let state = AppState::load(store).await?;
//!     let app = create_server(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};

/// Create the server with all routes and middleware.
///
/// `logging_middleware` emits the single per-request log line.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
