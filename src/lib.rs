//! # swarm-webhookd
//!
//! Webhook receiver that redeploys Docker Swarm services when a container
//! image is pushed.
//!
//! A private Docker Registry v2 instance (or Docker Hub) POSTs its push
//! notification to one of two endpoints. The daemon authorizes the sender
//! with a shared query-string secret, decodes the payload, resolves the
//! pushed image against a configured image→service map, and points the
//! mapped swarm service at the new image through the Docker Engine API.
//!
//! ## Architecture
//!
//! ```text
//! Registry / Docker Hub (HTTP POST)
//!     │
//!     ├── Router + fallbacks (api/)
//!     ├── Webhook handlers (api/handlers/)
//!     │
//!     ├── Payload normalization (domain/)
//!     │
//!     ├── SwarmUpdater (service/)
//!     └── Docker Engine (bollard)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod shutdown;
