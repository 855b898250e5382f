//! Daemon configuration loaded once at startup.
//!
//! Follows 12-factor style: the listen address comes from a plain
//! environment variable (or a `.env` file via `dotenvy`), while the webhook
//! configuration — registry credentials, the image→service map, and the
//! shared secret — arrives as a single base64url-encoded JSON blob so
//! operators can inject it through one secret slot.

use std::collections::HashMap;
use std::net::SocketAddr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use serde::{Deserialize, Serialize};

/// Environment variable holding the base64url JSON configuration blob.
pub const CONFIG_ENV: &str = "WEBHOOKD_CONFIG";

/// Environment variable for the HTTP listen address.
pub const LISTEN_ADDR_ENV: &str = "LISTEN_ADDR";

/// Errors fatal to startup; the listener is never bound after one of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The blob was not valid base64url.
    #[error("can't decode base64 value of WEBHOOKD_CONFIG: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded blob was not a valid [`HookConfig`] document.
    #[error("can't decode config json: {0}")]
    Json(#[from] serde_json::Error),

    /// `LISTEN_ADDR` was set but unparseable.
    #[error("invalid LISTEN_ADDR: {0}")]
    ListenAddr(#[from] std::net::AddrParseError),
}

/// Private registry credentials used for the swarm update call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryAuth {
    /// Registry account name.
    #[serde(default)]
    pub username: String,

    /// Registry account password or token.
    #[serde(default)]
    pub password: String,

    /// Registry host the credentials belong to.
    #[serde(default)]
    pub server_address: String,
}

/// Webhook configuration. Immutable after load and shared read-only by all
/// requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Credentials for the private registry.
    #[serde(default)]
    pub registry: RegistryAuth,

    /// Exact-string map from `host/repository:tag` to swarm service name.
    #[serde(default)]
    pub services: HashMap<String, String>,

    /// Shared secret carried by webhook senders in the `key` query
    /// parameter.
    #[serde(default)]
    pub secret_key: String,
}

impl HookConfig {
    /// Decodes a base64url JSON blob into a `HookConfig`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Base64`] when the blob is not valid base64url,
    /// [`ConfigError::Json`] when the decoded bytes are not a valid
    /// configuration document.
    pub fn from_base64(raw: &str) -> Result<Self, ConfigError> {
        let bytes = URL_SAFE.decode(raw)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Encodes this configuration the way [`HookConfig::from_base64`]
    /// expects it. Operator tooling uses this to produce the env blob.
    #[must_use]
    pub fn to_base64(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE.encode(json)
    }
}

/// Top-level daemon configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Webhook configuration decoded from [`CONFIG_ENV`].
    pub hooks: HookConfig,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` so a local `.env` file can supply the
    /// variables. A missing [`CONFIG_ENV`] decodes like an empty blob and
    /// fails on the JSON step: a broken configuration must keep the
    /// listener from binding.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] on an unparseable listen address or an undecodable
    /// configuration blob.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var(LISTEN_ADDR_ENV)
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string())
            .parse()?;

        let hooks = HookConfig::from_base64(&std::env::var(CONFIG_ENV).unwrap_or_default())?;

        Ok(Self { listen_addr, hooks })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn sample_config() -> HookConfig {
        HookConfig {
            registry: RegistryAuth {
                username: "vorona".to_string(),
                password: "thixie6loh9Uemier8hoh0se".to_string(),
                server_address: "docker-registry.private-host.com".to_string(),
            },
            services: HashMap::from([(
                "docker-registry.private-host.com/projectq-app:latest".to_string(),
                "projectq-stack-latest_backend".to_string(),
            )]),
            secret_key: "EF3rf34g3gfR2G3r3grf".to_string(),
        }
    }

    #[test]
    fn base64_round_trip_is_identity() {
        let config = sample_config();
        let Ok(decoded) = HookConfig::from_base64(&config.to_base64()) else {
            panic!("round trip failed");
        };
        assert_eq!(decoded, config);
    }

    #[test]
    fn truncated_base64_is_rejected() {
        let Err(err) = HookConfig::from_base64("e3") else {
            panic!("expected a base64 error");
        };
        assert!(matches!(err, ConfigError::Base64(_)));
        assert!(
            err.to_string()
                .starts_with("can't decode base64 value of WEBHOOKD_CONFIG:")
        );
    }

    #[test]
    fn empty_blob_fails_on_json_step() {
        let Err(err) = HookConfig::from_base64("") else {
            panic!("expected a json error");
        };
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn minimal_document_fills_defaults() {
        // "e30K" is "{}\n" in base64url.
        let Ok(config) = HookConfig::from_base64("e30K") else {
            panic!("expected a default config");
        };
        assert_eq!(config, HookConfig::default());
        assert!(config.services.is_empty());
        assert!(config.secret_key.is_empty());
    }
}
