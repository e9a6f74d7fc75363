//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **session**: in-memory and Redis-backed session stores
//! - **catalogue**: identifier set loaded from a JSON file
//!
//! Adapters translate between domain types and storage representations and
//! contain no purchase logic.

pub mod catalogue;
pub mod session;
