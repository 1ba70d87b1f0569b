use anyhow::Result;
use confsched_core::store::EventStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run(store: &dyn EventStore) -> Result<()> {
    let mut events = store.list_events().await?;

    if events.is_empty() {
        println!("{}", "No events yet.".dimmed());
        return Ok(());
    }

    events.sort_by_key(|e| e.start);
    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}
