//! Apply update candidates to the store of record.

use std::fmt;

use serde::Serialize;

use crate::candidate::UpdateCandidate;
use crate::error::ScheduleResult;
use crate::event::EventId;
use crate::store::EventStore;

/// Human-readable outcome of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "subject", rename_all = "snake_case")]
pub enum Notice {
    Updated(String),
    Added(String),
    Deleted(EventId),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Updated(title) => write!(f, "Updated: {title}"),
            Notice::Added(title) => write!(f, "Added: {title}"),
            Notice::Deleted(id) => write!(f, "Deleted event {id}"),
        }
    }
}

/// Write a candidate's new times through to the store.
///
/// The candidate is taken by value: once this returns, whether the write
/// succeeded or not, the caller no longer has it to apply again. A failed
/// write is returned as-is and never retried.
///
/// `end > start` is not checked here. The calendar only emits spans it
/// could draw, and other producers are trusted the same way.
pub async fn reconcile(
    store: &dyn EventStore,
    candidate: UpdateCandidate,
) -> ScheduleResult<Notice> {
    let inverted = candidate.is_inverted();
    let UpdateCandidate { id, title, start, end } = candidate;

    if inverted {
        tracing::warn!(%id, %start, %end, "applying update whose end is not after its start");
    }

    match store.update_event(&id, start, end).await {
        Ok(()) => {
            tracing::info!(%id, %title, %start, %end, "event rescheduled");
            Ok(Notice::Updated(title))
        }
        Err(e) => {
            tracing::error!(%id, error = %e, "failed to reschedule event");
            Err(e)
        }
    }
}
