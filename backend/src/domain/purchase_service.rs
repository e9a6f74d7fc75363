//! Purchase recording service.
//!
//! Implements [`PurchaseCommand`] as a strict pipeline: resume the session,
//! keep the requested items the catalogue knows, append them and save. A
//! failure at any step ends the request; nothing is retried and nothing is
//! saved after a failed resume.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    Catalogue, PurchaseCommand, RecordPurchaseRequest, RecordPurchaseResponse, SessionStore,
    SessionStoreError,
};
use crate::domain::{Error, ItemId, ItemIdList};

fn map_resume_error(error: SessionStoreError) -> Error {
    Error::session_unavailable(format!("failed to resume session: {error}"))
}

fn map_save_error(error: SessionStoreError) -> Error {
    Error::session_unavailable(format!("failed to persist session: {error}"))
}

/// Service appending catalogue items to resumed sessions.
///
/// Generic over the store and catalogue so the server can inject trait
/// objects while tests use concrete doubles.
pub struct PurchaseRecorder<S: ?Sized, C: ?Sized> {
    sessions: Arc<S>,
    catalogue: Arc<C>,
}

impl<S: ?Sized, C: ?Sized> Clone for PurchaseRecorder<S, C> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            catalogue: Arc::clone(&self.catalogue),
        }
    }
}

impl<S: ?Sized, C: ?Sized> PurchaseRecorder<S, C> {
    /// Create a recorder over a session store and a catalogue.
    pub fn new(sessions: Arc<S>, catalogue: Arc<C>) -> Self {
        Self {
            sessions,
            catalogue,
        }
    }
}

impl<S, C> PurchaseRecorder<S, C>
where
    S: ?Sized,
    C: Catalogue + ?Sized,
{
    /// Keep the identifiers the catalogue knows, in request order.
    fn filter_known(&self, items: &ItemIdList) -> Vec<ItemId> {
        items.iter().filter(|id| self.catalogue.exists(*id)).collect()
    }
}

#[async_trait]
impl<S, C> PurchaseCommand for PurchaseRecorder<S, C>
where
    S: SessionStore + ?Sized,
    C: Catalogue + ?Sized,
{
    async fn record_purchase(
        &self,
        request: RecordPurchaseRequest,
    ) -> Result<RecordPurchaseResponse, Error> {
        let RecordPurchaseRequest { session_id, items } = request;

        let mut session = self
            .sessions
            .resume(&session_id)
            .await
            .map_err(map_resume_error)?;

        let accepted = self.filter_known(&items);
        let ignored = items.len() - accepted.len();
        if ignored > 0 {
            debug!(ignored, "dropping items missing from the catalogue");
        }

        session.append_purchases(accepted.iter().copied());
        self.sessions
            .save(&session)
            .await
            .map_err(map_save_error)?;

        Ok(RecordPurchaseResponse { accepted, ignored })
    }
}

#[cfg(test)]
#[path = "purchase_service_tests.rs"]
mod tests;
