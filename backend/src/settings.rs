//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PURCHASE_RECORDER_*` environment variables
//! and an optional configuration file. Every field is optional; accessors
//! apply defaults and validate the raw values.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::inbound::http::validation::{DEFAULT_SESSION_PARAM, SessionParam, SessionParamError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Session lifetime applied by the Redis store, in seconds.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1440;

/// Errors raised when a configured value is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid session parameter name: {0}")]
    SessionParam(#[from] SessionParamError),
}

/// Configuration values for the purchase callback server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PURCHASE_RECORDER")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Query parameter carrying the session identifier.
    pub session_param: Option<String>,
    /// JSON catalogue of purchasable items.
    pub catalogue_path: Option<PathBuf>,
    /// Redis connection URL; sessions are kept in memory when absent.
    pub redis_url: Option<String>,
    /// Expiry applied to saved sessions by the Redis store.
    pub session_ttl_secs: Option<u64>,
    /// Fail callbacks for session identifiers the store does not know
    /// instead of starting an empty session.
    #[ortho_config(default = false)]
    pub reject_unknown_sessions: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| ConfigError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Validate the configured session parameter name.
    pub fn session_param(&self) -> Result<SessionParam, ConfigError> {
        let name = self
            .session_param
            .as_deref()
            .unwrap_or(DEFAULT_SESSION_PARAM);
        Ok(SessionParam::new(name)?)
    }

    pub fn catalogue_path(&self) -> Option<&Path> {
        self.catalogue_path.as_deref()
    }

    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref()
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs.unwrap_or(DEFAULT_SESSION_TTL_SECS))
    }

    /// Whether unknown session identifiers resume as empty sessions.
    pub fn create_missing_sessions(&self) -> bool {
        !self.reject_unknown_sessions
    }
}
