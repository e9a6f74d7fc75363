//! Session store adapters.
//!
//! Both adapters persist a session as a JSON object. Purchased item
//! identifiers live under `purchased`, which is written only once the
//! session has a purchased list; every other key is kept verbatim so
//! sessions shared with other parts of an application survive a
//! resume/save cycle.

mod memory;
mod redis;

pub use self::memory::InMemorySessionStore;
pub use self::redis::{RedisSessionStore, RedisSessionStoreOptions};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::ports::SessionStoreError;
use crate::domain::{ItemId, SessionId, SessionState};

/// Serialized shape of a stored session.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    purchased: Option<Vec<ItemId>>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

pub(crate) fn decode_session(id: &SessionId, raw: &str) -> Result<SessionState, SessionStoreError> {
    let document: SessionDocument = serde_json::from_str(raw)
        .map_err(|error| SessionStoreError::corrupted(error.to_string()))?;
    Ok(SessionState::from_parts(
        id.clone(),
        document.purchased,
        document.attributes,
    ))
}

pub(crate) fn encode_session(session: &SessionState) -> Result<String, SessionStoreError> {
    let document = SessionDocument {
        purchased: session
            .has_purchased_list()
            .then(|| session.purchased().to_vec()),
        attributes: session.attributes().clone(),
    };
    serde_json::to_string(&document).map_err(|error| SessionStoreError::corrupted(error.to_string()))
}

/// Turn the raw lookup result for `id` into a resumed session.
///
/// A missing document becomes an empty session when `create_missing` is
/// set and [`SessionStoreError::NotFound`] otherwise.
pub(crate) fn resume_document(
    id: &SessionId,
    raw: Option<&str>,
    create_missing: bool,
) -> Result<SessionState, SessionStoreError> {
    match raw {
        Some(raw) => decode_session(id, raw),
        None if create_missing => Ok(SessionState::new(id.clone())),
        None => Err(SessionStoreError::not_found()),
    }
}
