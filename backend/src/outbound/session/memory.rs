//! Process-local session store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{encode_session, resume_document};
use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionId, SessionState};

/// Session store keeping serialized sessions in a mutex-guarded map.
///
/// Suitable for development and tests. The lock is held only for the
/// duration of a single `resume` or `save`, so concurrent callbacks for one
/// session may overwrite each other.
///
/// # Examples
/// ```
/// use purchase_recorder::outbound::session::InMemorySessionStore;
///
/// let store = InMemorySessionStore::default();
/// store.insert_raw("abc", r#"{"purchased":[1]}"#);
/// assert_eq!(store.raw("abc").as_deref(), Some(r#"{"purchased":[1]}"#));
/// ```
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, String>>,
    create_missing: bool,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InMemorySessionStore {
    /// Create an empty store.
    ///
    /// With `create_missing` unset, resuming an unknown identifier fails
    /// with [`SessionStoreError::NotFound`].
    pub fn new(create_missing: bool) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            create_missing,
        }
    }

    /// Seed a raw session document, replacing any existing one.
    pub fn insert_raw(&self, id: impl Into<String>, document: impl Into<String>) {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.insert(id.into(), document.into());
    }

    /// Raw session document stored under `id`, if any.
    pub fn raw(&self, id: &str) -> Option<String> {
        let sessions = self
            .sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.get(id).cloned()
    }

    fn poisoned() -> SessionStoreError {
        SessionStoreError::unavailable("session map lock poisoned")
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn resume(&self, id: &SessionId) -> Result<SessionState, SessionStoreError> {
        let raw = {
            let sessions = self.sessions.lock().map_err(|_| Self::poisoned())?;
            sessions.get(id.as_str()).cloned()
        };
        resume_document(id, raw.as_deref(), self.create_missing)
    }

    async fn save(&self, session: &SessionState) -> Result<(), SessionStoreError> {
        let encoded = encode_session(session)?;
        let mut sessions = self.sessions.lock().map_err(|_| Self::poisoned())?;
        sessions.insert(session.id().as_str().to_owned(), encoded);
        Ok(())
    }
}
