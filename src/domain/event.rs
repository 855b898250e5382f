//! Payload decoding and normalization, one decoder per source format.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::PayloadError;

/// Normalized outcome of payload parsing.
///
/// `service_name` is the result of an exact-string lookup in the configured
/// services map and is legitimately empty for an unmapped image; the image
/// reference itself is always non-empty when a registry event was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    /// Fully qualified image reference, `host/repository:tag`.
    pub registry_image: String,

    /// Swarm service mapped to the image, or empty when unmapped.
    pub service_name: String,
}

/// Registry v2 notification envelope.
///
/// The registry batches events, but a push produces one event per
/// notification in practice, so only the first event has effect.
#[derive(Debug, Deserialize)]
pub struct RegistryPayload {
    /// Notification events as sent by the registry.
    #[serde(default)]
    pub events: Vec<RegistryEvent>,
}

/// A single registry notification event.
///
/// Unknown fields are ignored; missing fields decode to empty strings, the
/// same zero values the registry sends for incomplete events.
#[derive(Debug, Default, Deserialize)]
pub struct RegistryEvent {
    /// Event action, e.g. `push` or `pull`.
    #[serde(default)]
    pub action: String,

    /// Request metadata; carries the registry host.
    #[serde(default)]
    pub request: EventRequest,

    /// Target descriptor; carries repository and tag.
    #[serde(default)]
    pub target: EventTarget,
}

/// `request` block of a registry event.
#[derive(Debug, Default, Deserialize)]
pub struct EventRequest {
    /// Registry host the client pushed to.
    #[serde(default)]
    pub host: String,
}

/// `target` block of a registry event.
#[derive(Debug, Default, Deserialize)]
pub struct EventTarget {
    /// Repository path within the registry.
    #[serde(default)]
    pub repository: String,

    /// Image tag.
    #[serde(default)]
    pub tag: String,
}

/// Docker Hub hook payload.
///
/// Absent fields decode to empty strings: a bare `{}` yields the image `":"`
/// and an empty service name, which the handler answers with the 200
/// "empty ServiceName" body rather than an error.
#[derive(Debug, Default, Deserialize)]
pub struct DockerHubPayload {
    /// Repository block; carries `repo_name`.
    #[serde(default)]
    pub repository: HubRepository,

    /// Push block; carries the pushed tag.
    #[serde(default)]
    pub push_data: HubPushData,
}

/// `repository` block of a Docker Hub payload.
#[derive(Debug, Default, Deserialize)]
pub struct HubRepository {
    /// Namespaced repository name, e.g. `svendowideit/testhook`.
    #[serde(default)]
    pub repo_name: String,
}

/// `push_data` block of a Docker Hub payload.
#[derive(Debug, Default, Deserialize)]
pub struct HubPushData {
    /// Pushed tag.
    #[serde(default)]
    pub tag: String,
}

/// Webhook source format, selected by the endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookSource {
    /// Private Docker Registry v2 notification.
    Registry,

    /// Docker Hub hook.
    DockerHub,
}

impl WebhookSource {
    /// Decodes `body` and resolves the pushed image against `services`.
    ///
    /// Normalization is a pure function of payload and services map:
    /// resolving the same body twice against an unchanged map yields the
    /// same pair.
    ///
    /// # Errors
    ///
    /// [`PayloadError::Json`] on malformed JSON (the decoder message is
    /// surfaced verbatim), [`PayloadError::NoEvents`] for a registry
    /// envelope without events, [`PayloadError::PullExcluded`] when the
    /// first registry event is a pull.
    pub fn normalize(
        self,
        body: &[u8],
        services: &HashMap<String, String>,
    ) -> Result<NormalizedEvent, PayloadError> {
        let registry_image = match self {
            Self::Registry => {
                let payload: RegistryPayload = serde_json::from_slice(body)?;
                let Some(event) = payload.events.first() else {
                    return Err(PayloadError::NoEvents);
                };
                if event.action == "pull" {
                    return Err(PayloadError::PullExcluded);
                }
                format!(
                    "{}/{}:{}",
                    event.request.host, event.target.repository, event.target.tag
                )
            }
            Self::DockerHub => {
                let payload: DockerHubPayload = serde_json::from_slice(body)?;
                format!(
                    "{}:{}",
                    payload.repository.repo_name, payload.push_data.tag
                )
            }
        };

        let service_name = services.get(&registry_image).cloned().unwrap_or_default();

        Ok(NormalizedEvent {
            registry_image,
            service_name,
        })
    }
}
