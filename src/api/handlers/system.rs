//! Control-plane endpoints: health check and shutdown.
//!
//! These sit outside the webhook decision table and share no state with the
//! webhook path beyond the shutdown handle.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::app_state::AppState;

/// Body sent back by the shutdown endpoint before the listener closes.
pub const BYEBYE: &str = "BYE-BYE!";

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — service health status.
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /shutdown` — answers [`BYEBYE`] and starts a graceful listener
/// close. In-flight requests (this response included) are drained first.
pub async fn shutdown_handler(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("shutdown requested");
    state.shutdown.trigger();
    BYEBYE
}

/// Control-plane routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/shutdown", get(shutdown_handler))
}
