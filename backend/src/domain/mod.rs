//! Domain primitives, ports and the purchase recording service.
//!
//! Purpose: keep the callback's contracts (item list grammar, session
//! mutation rules, error taxonomy) free of HTTP and storage concerns.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `ItemId` / `ItemIdList`: catalogue identifiers and the `items` grammar.
//! - `SessionId` / `SessionState`: resumed session contents.
//! - `PurchaseRecorder`: implementation of the `PurchaseCommand` port.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod purchase;
pub mod purchase_service;
pub mod session;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::purchase::{ItemId, ItemIdList, ItemIdListError};
pub use self::purchase_service::PurchaseRecorder;
pub use self::session::{SessionId, SessionIdError, SessionState};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
