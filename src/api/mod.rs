//! HTTP layer: route table, fallbacks, and handler composition.
//!
//! The webhook surface is a closed set: POST to one of the two webhook
//! endpoints, or nothing. Method is checked before endpoint, so a non-POST
//! request answers 405 wherever it lands and a POST outside the set
//! answers 400.

pub mod handlers;

use axum::Router;
use axum::http::Method;
use axum::routing::post;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::error::HookError;

/// Registry notification endpoint.
pub const REGISTRY_WEBHOOK_PATH: &str = "/webhook/registry";

/// Docker Hub notification endpoint.
pub const DOCKERHUB_WEBHOOK_PATH: &str = "/webhook/dockerhub";

/// Builds the complete application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            REGISTRY_WEBHOOK_PATH,
            post(handlers::webhook::registry_webhook),
        )
        .route(
            DOCKERHUB_WEBHOOK_PATH,
            post(handlers::webhook::dockerhub_webhook),
        )
        .merge(handlers::system::routes())
        .fallback(misroute)
        .method_not_allowed_fallback(misroute)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Shared terminal for unknown paths and mismatched methods.
async fn misroute(method: Method) -> HookError {
    if method == Method::POST {
        HookError::BadEndpoint
    } else {
        HookError::BadMethod
    }
}
