//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`SessionStore`], [`Catalogue`]) describe the collaborators
//! the purchase pipeline depends on. The driving port ([`PurchaseCommand`])
//! is what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue;
mod purchase_command;
mod session_store;

#[cfg(test)]
pub use catalogue::MockCatalogue;
pub use catalogue::Catalogue;
#[cfg(test)]
pub use purchase_command::MockPurchaseCommand;
pub use purchase_command::{PurchaseCommand, RecordPurchaseRequest, RecordPurchaseResponse};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
