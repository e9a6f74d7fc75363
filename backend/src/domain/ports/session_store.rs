//! Driven port for resuming and persisting sessions by identifier.
//!
//! The store owns physical persistence and any per-session locking. The
//! domain only asks it to resume a session and later save it back; it makes
//! no atomicity assumption across the two calls.

use async_trait::async_trait;

use crate::domain::{SessionId, SessionState};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// Backing storage could not be reached.
        Unavailable { message: String } =>
            "session store unavailable: {message}",
        /// Stored session data could not be decoded or encoded.
        Corrupted { message: String } =>
            "session data corrupted: {message}",
        /// No session exists under the identifier and the store will not create one.
        NotFound =>
            "session does not exist",
    }
}

/// Port for session resumption and persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resume the session stored under `id`.
    ///
    /// Stores configured to create missing sessions return an empty
    /// [`SessionState`] for unknown identifiers.
    async fn resume(&self, id: &SessionId) -> Result<SessionState, SessionStoreError>;

    /// Persist `session` under its own identifier.
    async fn save(&self, session: &SessionState) -> Result<(), SessionStoreError>;
}
