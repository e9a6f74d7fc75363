//! Server entry-point: loads settings, builds adapters and serves the
//! purchase callback.

mod server;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use purchase_recorder::inbound::http::health::HealthState;
use purchase_recorder::settings::ServerSettings;
use server::{
    ServerConfig, build_catalogue, build_session_store, create_server, mark_unhealthy_on_shutdown,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let session_param = settings.session_param().map_err(std::io::Error::other)?;

    let sessions = build_session_store(&settings).await?;
    let catalogue = build_catalogue(&settings)?;

    let config = ServerConfig::new(bind_addr, session_param, sessions, catalogue);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(mark_unhealthy_on_shutdown(health_state));
    info!(%bind_addr, "purchase recorder listening");
    server.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("purchase_recorder")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}
