use anyhow::Result;
use confsched_core::Notice;
use confsched_core::config::ScheduleConfig;
use confsched_core::form::{AddEventForm, ConferenceWeek};
use confsched_core::store::EventStore;

use crate::render::Render;

pub async fn run(store: &dyn EventStore, config: &ScheduleConfig, form: AddEventForm) -> Result<()> {
    let week = ConferenceWeek::starting(config.conference_week_start);
    let event = form.validate(&week)?;

    store.insert_event(&event).await?;
    tracing::info!(title = %event.title, start = %event.start, "event added");

    println!("{}", Notice::Added(event.title).render());
    Ok(())
}
