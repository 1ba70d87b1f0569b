//! Access to the event table.
//!
//! Every operation is a single round trip to the store of record. Nothing
//! is cached between calls, and updates/deletes of ids the store doesn't
//! know are silent no-ops rather than errors.

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::ScheduleResult;
use crate::event::{Event, EventId, NewEvent};

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Every event in the table, in whatever order the store returns them.
    async fn list_events(&self) -> ScheduleResult<Vec<Event>>;

    /// Insert a new row; the store assigns the id.
    async fn insert_event(&self, event: &NewEvent) -> ScheduleResult<()>;

    /// Overwrite `start` and `end` of one row, leaving other columns alone.
    async fn update_event(
        &self,
        id: &EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ScheduleResult<()>;

    async fn delete_event(&self, id: &EventId) -> ScheduleResult<()>;
}
