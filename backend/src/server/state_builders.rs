//! Builders turning settings into session store and catalogue adapters.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use purchase_recorder::domain::PurchaseRecorder;
use purchase_recorder::domain::ports::{Catalogue, SessionStore};
use purchase_recorder::inbound::http::state::HttpState;
use purchase_recorder::outbound::catalogue::InMemoryCatalogue;
use purchase_recorder::outbound::session::{
    InMemorySessionStore, RedisSessionStore, RedisSessionStoreOptions,
};
use purchase_recorder::settings::ServerSettings;

use super::ServerConfig;

/// Select the session store: Redis when a URL is configured, memory otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when the Redis pool cannot be built.
pub async fn build_session_store(
    settings: &ServerSettings,
) -> std::io::Result<Arc<dyn SessionStore>> {
    let create_missing = settings.create_missing_sessions();
    match settings.redis_url() {
        Some(url) => {
            let options = RedisSessionStoreOptions {
                ttl: settings.session_ttl(),
                create_missing,
                ..RedisSessionStoreOptions::default()
            };
            let store = RedisSessionStore::connect(url, options)
                .await
                .map_err(|e| std::io::Error::other(format!("redis session store: {e}")))?;
            info!(ttl_secs = options.ttl.as_secs(), "using redis session store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("no redis url configured; sessions are kept in process memory");
            Ok(Arc::new(InMemorySessionStore::new(create_missing)))
        }
    }
}

/// Load the catalogue file, or an empty catalogue when none is configured.
///
/// # Errors
/// Returns [`std::io::Error`] when the configured file cannot be loaded.
pub fn build_catalogue(settings: &ServerSettings) -> std::io::Result<Arc<dyn Catalogue>> {
    let Some(path) = settings.catalogue_path() else {
        warn!("no catalogue configured; every purchased item will be ignored");
        return Ok(Arc::new(InMemoryCatalogue::default()));
    };
    let catalogue = InMemoryCatalogue::load(path)
        .map_err(|e| std::io::Error::other(format!("catalogue: {e}")))?;
    info!(path = %path.display(), items = catalogue.len(), "catalogue loaded");
    Ok(Arc::new(catalogue))
}

/// Wire the purchase recorder into HTTP handler state.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let recorder = PurchaseRecorder::new(config.sessions.clone(), config.catalogue.clone());
    web::Data::new(HttpState::new(
        Arc::new(recorder),
        config.session_param.clone(),
    ))
}
