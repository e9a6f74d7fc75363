//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use purchase_recorder::domain::ports::{Catalogue, SessionStore};
use purchase_recorder::inbound::http::validation::SessionParam;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) session_param: SessionParam,
    pub(crate) sessions: Arc<dyn SessionStore>,
    pub(crate) catalogue: Arc<dyn Catalogue>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from resolved adapters.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        session_param: SessionParam,
        sessions: Arc<dyn SessionStore>,
        catalogue: Arc<dyn Catalogue>,
    ) -> Self {
        Self {
            bind_addr,
            session_param,
            sessions,
            catalogue,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
