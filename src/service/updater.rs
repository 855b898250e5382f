//! Swarm service image updater.
//!
//! Read-modify-write against the engine: inspect the service by name, set
//! the container image on the fetched spec, and submit the update with the
//! inspected version token. A stale token loses to whichever concurrent
//! update committed first; the engine's rejection is returned as-is and the
//! webhook sender decides whether to retry.

use async_trait::async_trait;
use bollard::errors::Error as DockerError;

use crate::config::RegistryAuth;
use crate::service::swarm::{self, SwarmClient, SwarmConnector};

/// Errors from the update pipeline, one variant per stage so the failure
/// point is identifiable from the message alone.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// Guard for direct callers; the webhook handler never forwards an
    /// empty service name or image.
    #[error("nothing to do, exit. SN: {service_name} IMG: {registry_image}")]
    NothingToDo {
        /// Service name as received.
        service_name: String,
        /// Image reference as received.
        registry_image: String,
    },

    /// Engine connection could not be established.
    #[error("can't connect to docker host: {source}")]
    Connect {
        /// Engine client error.
        source: DockerError,
    },

    /// Service inspect failed: unknown name, unreachable daemon.
    #[error("can't connect to service {service_name}: {source}")]
    Inspect {
        /// Service that was being inspected.
        service_name: String,
        /// Engine client error.
        source: DockerError,
    },

    /// Engine rejected the update: version conflict, registry auth
    /// failure, daemon error.
    #[error("updating a service: {service_id}, {source}")]
    Update {
        /// Engine-side service id.
        service_id: String,
        /// Engine client error.
        source: DockerError,
    },
}

/// Points a named swarm service at a new container image.
#[async_trait]
pub trait ImageUpdater: Send + Sync {
    /// Updates `service_name` to run `registry_image`.
    ///
    /// # Errors
    ///
    /// [`UpdateError`], stage-prefixed; see the variant docs.
    async fn update(&self, service_name: &str, registry_image: &str) -> Result<(), UpdateError>;
}

/// Production updater backed by a [`SwarmConnector`].
#[derive(Debug)]
pub struct SwarmUpdater<C> {
    connector: C,
    registry: RegistryAuth,
}

impl<C> SwarmUpdater<C> {
    /// Creates an updater that connects through `connector` and
    /// authenticates image pulls with `registry`.
    pub fn new(connector: C, registry: RegistryAuth) -> Self {
        Self {
            connector,
            registry,
        }
    }
}

#[async_trait]
impl<C: SwarmConnector> ImageUpdater for SwarmUpdater<C> {
    async fn update(&self, service_name: &str, registry_image: &str) -> Result<(), UpdateError> {
        if service_name.is_empty() || registry_image.is_empty() {
            return Err(UpdateError::NothingToDo {
                service_name: service_name.to_owned(),
                registry_image: registry_image.to_owned(),
            });
        }

        // Fresh connection per update; dropped on every exit path.
        let client = self
            .connector
            .connect()
            .map_err(|source| UpdateError::Connect { source })?;

        let service =
            client
                .inspect_service(service_name)
                .await
                .map_err(|source| UpdateError::Inspect {
                    service_name: service_name.to_owned(),
                    source,
                })?;

        let service_id = service.id.unwrap_or_default();
        let version = service.version.and_then(|v| v.index).unwrap_or_default();

        // Mutate only the image field; everything else rides along
        // unchanged under the inspected version token.
        let mut spec = service.spec.unwrap_or_default();
        spec.task_template
            .get_or_insert_with(Default::default)
            .container_spec
            .get_or_insert_with(Default::default)
            .image = Some(registry_image.to_owned());

        let response = client
            .update_service(
                &service_id,
                version,
                spec,
                swarm::credentials_for(&self.registry),
            )
            .await
            .map_err(|source| UpdateError::Update {
                service_id: service_id.clone(),
                source,
            })?;

        for warning in response.warnings.unwrap_or_default() {
            tracing::warn!(service = service_name, %warning, "engine warning on service update");
        }
        tracing::info!(
            service = service_name,
            id = %service_id,
            image = registry_image,
            "service updated"
        );
        Ok(())
    }
}
