//! One schedule page load: apply any pending move, then read everything back.

use crate::candidate::UpdateCandidate;
use crate::error::ScheduleResult;
use crate::event::Event;
use crate::reconcile::{Notice, reconcile};
use crate::store::EventStore;
use crate::view::{CalendarFeed, CalendarView};

/// A move waiting to be applied on this load, if any.
///
/// Decoding can fail; a bad payload is reported on the page the same way a
/// failed write is.
pub type PendingUpdate = Option<ScheduleResult<UpdateCandidate>>;

/// Result of a page load, ready to render.
#[derive(Debug)]
pub struct Page {
    pub notice: Option<Notice>,
    pub error: Option<String>,
    pub events: Vec<Event>,
    pub feed: CalendarFeed,
}

/// Runs the load sequence against a store.
pub struct PageController<'a> {
    store: &'a dyn EventStore,
    view: &'a CalendarView,
}

impl<'a> PageController<'a> {
    pub fn new(store: &'a dyn EventStore, view: &'a CalendarView) -> Self {
        PageController { store, view }
    }

    /// Reconcile `pending` (consuming it), then fetch a fresh event list.
    ///
    /// A failed reconcile doesn't stop the page from rendering; it becomes
    /// the page's error. A failed list does fail the load.
    pub async fn load(&self, pending: PendingUpdate) -> ScheduleResult<Page> {
        let (notice, error) = match pending {
            None => (None, None),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "discarding undecodable update");
                (None, Some(e.to_string()))
            }
            Some(Ok(candidate)) => match reconcile(self.store, candidate).await {
                Ok(notice) => (Some(notice), None),
                Err(e) => (None, Some(e.to_string())),
            },
        };

        let events = self.store.list_events().await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to load events");
        })?;
        tracing::debug!(count = events.len(), "loaded events");

        let feed = self.view.feed(&events);

        Ok(Page {
            notice,
            error,
            events,
            feed,
        })
    }
}
