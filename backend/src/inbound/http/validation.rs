//! Query-string validation for the purchase callback.
//!
//! The callback carries two required parameters: the session identifier,
//! whose name is configurable, and `items`. Any missing or malformed value
//! rejects the whole request with a `BadRequest` error before the session
//! store is touched.

use std::collections::HashMap;

use actix_web::web;
use serde_json::json;

use crate::domain::{Error, ItemIdList, ItemIdListError, SessionId};

/// Name of the `items` query parameter.
pub const ITEMS_PARAM: &str = "items";

/// Default name of the session identifier query parameter.
pub const DEFAULT_SESSION_PARAM: &str = "sessionId";

/// Validation error codes for callback query failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptySessionId,
    MalformedQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptySessionId => "empty_session_id",
            ErrorCode::MalformedQuery => "malformed_query",
        }
    }
}

/// Errors raised when configuring the session parameter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionParamError {
    #[error("session parameter name must not be empty")]
    Empty,
    #[error("session parameter name must differ from 'items'")]
    CollidesWithItems,
}

/// Configured name of the query parameter holding the session identifier.
///
/// # Examples
/// ```
/// use purchase_recorder::inbound::http::validation::SessionParam;
///
/// assert_eq!(SessionParam::default().as_str(), "sessionId");
/// assert!(SessionParam::new("PHPSESSID").is_ok());
/// assert!(SessionParam::new("items").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParam(String);

impl SessionParam {
    /// Validate a parameter name.
    pub fn new(name: impl Into<String>) -> Result<Self, SessionParamError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SessionParamError::Empty);
        }
        if name == ITEMS_PARAM {
            return Err(SessionParamError::CollidesWithItems);
        }
        Ok(Self(name))
    }

    /// Borrow the parameter name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for SessionParam {
    fn default() -> Self {
        Self(DEFAULT_SESSION_PARAM.to_owned())
    }
}

/// Validated callback parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQuery {
    pub session_id: SessionId,
    pub items: ItemIdList,
}

fn missing_field_error(field: &str) -> Error {
    Error::bad_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

fn empty_session_id_error(field: &str) -> Error {
    Error::bad_request(format!("{field} must not be empty")).with_details(json!({
        "field": field,
        "code": ErrorCode::EmptySessionId.as_str(),
    }))
}

fn malformed_query_error(reason: impl std::fmt::Display) -> Error {
    Error::bad_request(format!("query string could not be decoded: {reason}")).with_details(
        json!({
            "code": ErrorCode::MalformedQuery.as_str(),
        }),
    )
}

fn invalid_items_error(error: &ItemIdListError) -> Error {
    Error::bad_request(error.to_string()).with_details(json!({
        "field": ITEMS_PARAM,
        "index": error.index(),
        "code": error.code(),
    }))
}

/// Decode and validate the callback query string.
///
/// Values are percent-decoded first (invalid UTF-8 is replaced, not
/// rejected); when a key repeats, the last value wins.
pub fn parse_callback_query(query: &str, session_param: &SessionParam) -> Result<CallbackQuery, Error> {
    let params = web::Query::<HashMap<String, String>>::from_query(query)
        .map_err(malformed_query_error)?
        .into_inner();

    let field = session_param.as_str();
    let raw_session = params.get(field).ok_or_else(|| missing_field_error(field))?;
    let session_id =
        SessionId::new(raw_session.as_str()).map_err(|_| empty_session_id_error(field))?;

    let raw_items = params
        .get(ITEMS_PARAM)
        .ok_or_else(|| missing_field_error(ITEMS_PARAM))?;
    let items = ItemIdList::parse(raw_items).map_err(|error| invalid_items_error(&error))?;

    Ok(CallbackQuery { session_id, items })
}
