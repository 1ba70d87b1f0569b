//! In-process event store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::EventStore;
use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Event, EventId, NewEvent};

/// Keeps events in memory with the same semantics as the hosted table:
/// sequential ids, insertion order, silent no-ops for unknown ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<Event>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ScheduleResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| ScheduleError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list_events(&self) -> ScheduleResult<Vec<Event>> {
        Ok(self.lock()?.events.clone())
    }

    async fn insert_event(&self, event: &NewEvent) -> ScheduleResult<()> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let id = EventId::from(inner.next_id);
        inner.events.push(event.clone().into_event(id));
        Ok(())
    }

    async fn update_event(
        &self,
        id: &EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ScheduleResult<()> {
        let mut inner = self.lock()?;
        if let Some(event) = inner.events.iter_mut().find(|e| &e.id == id) {
            event.start = start;
            event.end = end;
        }
        Ok(())
    }

    async fn delete_event(&self, id: &EventId) -> ScheduleResult<()> {
        self.lock()?.events.retain(|e| &e.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.into(),
            start: at(9),
            end: at(10),
            colour: Colour::default(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        store.insert_event(&new_event("A")).await.unwrap();
        store.insert_event(&new_event("B")).await.unwrap();

        let events = store.list_events().await.unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_silent() {
        let store = MemoryStore::new();
        store.insert_event(&new_event("A")).await.unwrap();
        let before = store.list_events().await.unwrap();

        store.update_event(&EventId::from(99), at(11), at(12)).await.unwrap();
        assert_eq!(store.list_events().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_silent() {
        let store = MemoryStore::new();
        store.insert_event(&new_event("A")).await.unwrap();

        store.delete_event(&EventId::from(99)).await.unwrap();
        assert_eq!(store.list_events().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_internal_error() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let holder = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.inner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = store.list_events().await.unwrap_err();
        assert!(matches!(err, ScheduleError::Internal(_)));
    }
}
