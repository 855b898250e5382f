//! Domain layer: webhook payload shapes and image→service resolution.
//!
//! Two source formats arrive on the wire — Docker Registry v2 notification
//! envelopes and Docker Hub hook payloads. Each normalizes to the same
//! `(image reference, service name)` pair.

pub mod event;

pub use event::{DockerHubPayload, NormalizedEvent, RegistryPayload, WebhookSource};
