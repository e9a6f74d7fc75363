//! Driven port for item catalogue lookups.

use crate::domain::ItemId;

/// Read-only view of the items that can be purchased.
///
/// Only existence matters to the purchase pipeline; adapters decide where the
/// catalogue comes from and how it is refreshed.
#[cfg_attr(test, mockall::automock)]
pub trait Catalogue: Send + Sync {
    /// Whether `id` names a known item.
    fn exists(&self, id: ItemId) -> bool;
}
