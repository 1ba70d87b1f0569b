use anyhow::Result;
use confsched_core::store::EventStore;
use confsched_core::{EventId, Notice};

use crate::render::Render;

pub async fn run(store: &dyn EventStore, id: &str) -> Result<()> {
    let id = EventId::from(id);

    store.delete_event(&id).await?;
    tracing::info!(%id, "event deleted");

    println!("{}", Notice::Deleted(id).render());
    Ok(())
}
