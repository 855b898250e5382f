//! Webhook endpoints: registry and Docker Hub push notification sinks.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::app_state::AppState;
use crate::domain::WebhookSource;
use crate::error::HookError;

/// Query parameters accepted by the webhook endpoints.
#[derive(Debug, Deserialize)]
pub struct HookParams {
    /// Shared secret; must equal the configured `secret_key` exactly.
    pub key: Option<String>,
}

/// `POST /webhook/registry` — private registry v2 notification sink.
///
/// # Errors
///
/// [`HookError`] for authorization, payload, and update failures; the
/// unmapped-image case is an error variant answered with status 200.
pub async fn registry_webhook(
    State(state): State<AppState>,
    Query(params): Query<HookParams>,
    body: Bytes,
) -> Result<Json<Value>, HookError> {
    handle(&state, WebhookSource::Registry, params.key.as_deref(), &body).await
}

/// `POST /webhook/dockerhub` — Docker Hub hook sink.
///
/// # Errors
///
/// Same contract as [`registry_webhook`].
pub async fn dockerhub_webhook(
    State(state): State<AppState>,
    Query(params): Query<HookParams>,
    body: Bytes,
) -> Result<Json<Value>, HookError> {
    handle(&state, WebhookSource::DockerHub, params.key.as_deref(), &body).await
}

/// Shared pipeline: authorize, normalize, update.
async fn handle(
    state: &AppState,
    source: WebhookSource,
    key: Option<&str>,
    body: &[u8],
) -> Result<Json<Value>, HookError> {
    if key != Some(state.config.secret_key.as_str()) {
        return Err(HookError::Unauthorized);
    }

    let event = source.normalize(body, &state.config.services)?;
    if event.service_name.is_empty() {
        // Status 200 on purpose: registry sinks retry hard on non-2xx and
        // an unmapped image is not a failure.
        return Err(HookError::UnmappedImage {
            registry_image: event.registry_image,
        });
    }

    tracing::info!(
        image = %event.registry_image,
        service = %event.service_name,
        "processing push notification"
    );
    state
        .updater
        .update(&event.service_name, &event.registry_image)
        .await?;

    Ok(Json(json!({"status": "OK"})))
}
