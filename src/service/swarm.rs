//! Docker Engine client seam.
//!
//! [`SwarmConnector`] yields a fresh client per update call; the connection
//! is dropped when the call returns, on every exit path. [`SwarmClient`]
//! covers the two engine operations the updater needs.

use async_trait::async_trait;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::errors::Error as DockerError;
use bollard::models::{Service, ServiceSpec, ServiceUpdateResponse};
use bollard::service::{InspectServiceOptions, UpdateServiceOptions};

use crate::config::RegistryAuth;

/// Opens a connection to the Docker engine.
pub trait SwarmConnector: Send + Sync + 'static {
    /// Client handed to the updater for the duration of one call.
    type Client: SwarmClient;

    /// Connects to the engine.
    ///
    /// # Errors
    ///
    /// The engine client's connect error, e.g. for a malformed
    /// `DOCKER_HOST`.
    fn connect(&self) -> Result<Self::Client, DockerError>;
}

/// The two engine operations the updater performs.
#[async_trait]
pub trait SwarmClient: Send + Sync {
    /// Fetches a service by name, including its spec and version token.
    ///
    /// # Errors
    ///
    /// The engine error for an unknown name or an unreachable daemon.
    async fn inspect_service(&self, name: &str) -> Result<Service, DockerError>;

    /// Submits an updated spec for the service `id` at `version`.
    ///
    /// Returns any warnings the engine attached to the update.
    ///
    /// # Errors
    ///
    /// The engine error on rejection: stale version, registry auth
    /// failure, daemon error.
    async fn update_service(
        &self,
        id: &str,
        version: u64,
        spec: ServiceSpec,
        credentials: Option<DockerCredentials>,
    ) -> Result<ServiceUpdateResponse, DockerError>;
}

/// Production connector. Engine discovery is environment-driven:
/// `DOCKER_HOST` and TLS material are resolved by bollard, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvDockerConnector;

impl SwarmConnector for EnvDockerConnector {
    type Client = Docker;

    fn connect(&self) -> Result<Docker, DockerError> {
        Docker::connect_with_defaults()
    }
}

#[async_trait]
impl SwarmClient for Docker {
    async fn inspect_service(&self, name: &str) -> Result<Service, DockerError> {
        Docker::inspect_service(self, name, None::<InspectServiceOptions>).await
    }

    async fn update_service(
        &self,
        id: &str,
        version: u64,
        spec: ServiceSpec,
        credentials: Option<DockerCredentials>,
    ) -> Result<ServiceUpdateResponse, DockerError> {
        let options = UpdateServiceOptions {
            version,
            ..Default::default()
        };
        Docker::update_service(self, id, spec, options, credentials).await
    }
}

/// Builds the credential blob for an update call.
///
/// The engine receives it base64-JSON-encoded in the `X-Registry-Auth`
/// header (bollard does the encoding); `None` when either the username or
/// the password is unset, so public images update without auth.
#[must_use]
pub fn credentials_for(auth: &RegistryAuth) -> Option<DockerCredentials> {
    if auth.username.is_empty() || auth.password.is_empty() {
        return None;
    }
    Some(DockerCredentials {
        username: Some(auth.username.clone()),
        password: Some(auth.password.clone()),
        serveraddress: Some(auth.server_address.clone()),
        ..Default::default()
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_username_and_password() {
        let mut auth = RegistryAuth {
            username: "vorona".to_string(),
            password: String::new(),
            server_address: "docker-registry.private-host.com".to_string(),
        };
        assert!(credentials_for(&auth).is_none());

        auth.password = "thixie6loh9Uemier8hoh0se".to_string();
        let Some(credentials) = credentials_for(&auth) else {
            panic!("expected credentials");
        };
        assert_eq!(credentials.username.as_deref(), Some("vorona"));
        assert_eq!(
            credentials.serveraddress.as_deref(),
            Some("docker-registry.private-host.com")
        );
    }

    #[test]
    fn empty_auth_yields_no_credentials() {
        assert!(credentials_for(&RegistryAuth::default()).is_none());
    }
}
