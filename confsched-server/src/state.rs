use std::sync::Arc;

use anyhow::Result;
use confsched_core::config::{ScheduleConfig, StoreConfig};
use confsched_core::form::ConferenceWeek;
use confsched_core::store::{EventStore, RestStore};
use confsched_core::view::CalendarView;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // No event data is kept here; every request goes back to the store.
    pub store: Arc<dyn EventStore>,
    pub view: Arc<CalendarView>,
    pub week: ConferenceWeek,
}

impl AppState {
    /// Connect to the hosted table named in the environment.
    ///
    /// Fails if either store variable is missing, before anything binds.
    pub fn from_env(config: &ScheduleConfig) -> Result<Self> {
        let store_config = StoreConfig::from_env()?;
        tracing::info!(url = %store_config.url, table = %config.store.table, "using hosted event store");

        let store = RestStore::new(&store_config, &config.store)?;
        Ok(Self::with_store(Arc::new(store), config))
    }

    pub fn with_store(store: Arc<dyn EventStore>, config: &ScheduleConfig) -> Self {
        AppState {
            store,
            view: Arc::new(CalendarView::from_config(config)),
            week: ConferenceWeek::starting(config.conference_week_start),
        }
    }
}
