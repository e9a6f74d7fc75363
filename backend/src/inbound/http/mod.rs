//! HTTP inbound adapter exposing the purchase callback and health probes.

pub mod callback;
pub mod error;
pub mod health;
pub mod state;
pub mod validation;

pub use error::ApiResult;
