//! Configuration types for confsched.
//!
//! Display and server settings live in `~/.config/confsched/config.toml`.
//! Store credentials are read from the environment only.

mod schedule_config;
mod store_config;

pub use schedule_config::{CalendarSettings, ScheduleConfig, ServerSettings, StoreSettings};
pub use store_config::{KEY_VAR, StoreConfig, URL_VAR};
