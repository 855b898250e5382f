//! Service layer: the swarm image updater and the Docker Engine seam.
//!
//! [`SwarmUpdater`] performs the read-modify-write against the engine;
//! [`swarm`] holds the connector/client traits that keep the engine
//! mockable in tests.

pub mod swarm;
pub mod updater;

pub use swarm::{EnvDockerConnector, SwarmClient, SwarmConnector};
pub use updater::{ImageUpdater, SwarmUpdater, UpdateError};
