//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! the driving port only and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::PurchaseCommand;
use crate::inbound::http::validation::SessionParam;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub purchases: Arc<dyn PurchaseCommand>,
    pub session_param: SessionParam,
}

impl HttpState {
    /// Construct state from the purchase port and the session parameter name.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use purchase_recorder::domain::PurchaseRecorder;
    /// use purchase_recorder::inbound::http::state::HttpState;
    /// use purchase_recorder::inbound::http::validation::SessionParam;
    /// use purchase_recorder::outbound::catalogue::InMemoryCatalogue;
    /// use purchase_recorder::outbound::session::InMemorySessionStore;
    ///
    /// let recorder = PurchaseRecorder::new(
    ///     Arc::new(InMemorySessionStore::default()),
    ///     Arc::new(InMemoryCatalogue::from_ids([1, 2, 3])),
    /// );
    /// let state = HttpState::new(Arc::new(recorder), SessionParam::default());
    /// assert_eq!(state.session_param.as_str(), "sessionId");
    /// ```
    pub fn new(purchases: Arc<dyn PurchaseCommand>, session_param: SessionParam) -> Self {
        Self {
            purchases,
            session_param,
        }
    }
}
