//! Driving port for recording purchases against a session.

use async_trait::async_trait;

use crate::domain::{Error, ItemId, ItemIdList, SessionId};

/// Validated purchase callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPurchaseRequest {
    pub session_id: SessionId,
    pub items: ItemIdList,
}

/// Outcome of a recorded purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPurchaseResponse {
    /// Items appended to the session, in request order.
    pub accepted: Vec<ItemId>,
    /// Count of requested items missing from the catalogue.
    pub ignored: usize,
}

/// Port for appending purchased catalogue items to a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseCommand: Send + Sync {
    /// Resume the session, keep the catalogue items and persist them.
    async fn record_purchase(
        &self,
        request: RecordPurchaseRequest,
    ) -> Result<RecordPurchaseResponse, Error>;
}
