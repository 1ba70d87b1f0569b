//! Apply a move the same way a calendar drag does.

use anyhow::Result;
use confsched_core::EventId;
use confsched_core::candidate::Reschedule;
use confsched_core::reconcile::reconcile;
use confsched_core::store::EventStore;

use crate::render::Render;

pub async fn run(store: &dyn EventStore, id: &str, title: &str, start: &str, end: &str) -> Result<()> {
    let candidate = Reschedule {
        title: title.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
    .into_candidate(EventId::from(id))?;

    if candidate.is_inverted() {
        eprintln!("warning: end is not after start; writing it anyway");
    }

    let notice = reconcile(store, candidate).await?;
    println!("{}", notice.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use confsched_core::store::MemoryStore;
    use confsched_core::{Colour, NewEvent};

    #[tokio::test]
    async fn test_move_changes_only_times() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let store = MemoryStore::new();
        store
            .insert_event(&NewEvent {
                title: "Keynote".into(),
                start: day.and_hms_opt(9, 0, 0).unwrap(),
                end: day.and_hms_opt(10, 0, 0).unwrap(),
                colour: Colour::new("#ff0000"),
            })
            .await
            .unwrap();

        run(&store, "1", "ignored", "2025-12-01T10:00", "2025-12-01T11:00:00Z")
            .await
            .unwrap();

        let events = store.list_events().await.unwrap();
        assert_eq!(events[0].start, day.and_hms_opt(10, 0, 0).unwrap());
        assert_eq!(events[0].end, day.and_hms_opt(11, 0, 0).unwrap());
        assert_eq!(events[0].title, "Keynote");
        assert_eq!(events[0].colour.as_str(), "#ff0000");
    }

    #[tokio::test]
    async fn test_bad_timestamp_is_rejected() {
        let store = MemoryStore::new();
        assert!(run(&store, "1", "", "soon", "later").await.is_err());
    }
}
