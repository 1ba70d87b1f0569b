//! Conference and display configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

const DEFAULT_WEEK_START: &str = "2025-12-01";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4096;
const DEFAULT_TABLE: &str = "Events";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_week_start() -> NaiveDate {
    NaiveDate::parse_from_str(DEFAULT_WEEK_START, "%Y-%m-%d").unwrap_or_default()
}

/// Settings at ~/.config/confsched/config.toml, overridable with
/// `CONFSCHED_*` environment variables (`CONFSCHED_SERVER__PORT=8080`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Monday of the conference week.
    #[serde(default = "default_week_start")]
    pub conference_week_start: NaiveDate,

    #[serde(default)]
    pub calendar: CalendarSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

/// How the time grid is displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub slot_min_time: String,
    pub slot_max_time: String,
    pub locale: String,
    pub hour12: bool,
    /// Viewport width below which the list view replaces the grid.
    pub list_breakpoint_px: u32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            slot_min_time: "08:30:00".to_string(),
            slot_max_time: "17:00:00".to_string(),
            locale: "en-gb".to_string(),
            hour12: false,
            list_breakpoint_px: 768,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub table: String,
    pub timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            conference_week_start: default_week_start(),
            calendar: CalendarSettings::default(),
            server: ServerSettings::default(),
            store: StoreSettings::default(),
        }
    }
}

impl ScheduleConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("confsched");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first
    /// if nothing exists there yet.
    pub fn load() -> ScheduleResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from `path` (optional) layered under the environment.
    pub fn load_from(path: &Path) -> ScheduleResult<Self> {
        let config: ScheduleConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("CONFSCHED")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ScheduleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ScheduleResult<()> {
        use chrono::{Datelike, Weekday};

        if self.conference_week_start.weekday() != Weekday::Mon {
            return Err(ScheduleError::Config(format!(
                "conference_week_start must be a Monday, got {} ({})",
                self.conference_week_start,
                self.conference_week_start.weekday()
            )));
        }

        Ok(())
    }

    /// The effective settings, as they would be written to the config file.
    pub fn to_toml(&self) -> ScheduleResult<String> {
        toml::to_string_pretty(self).map_err(|e| ScheduleError::Serialization(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ScheduleResult<()> {
        let contents = format!(
            "\
# confsched configuration
#
# Store credentials are NOT read from here. Set SUPABASE_URL and
# SUPABASE_KEY in the environment (or a .env file).

# Monday of the conference week:
# conference_week_start = \"{DEFAULT_WEEK_START}\"

# [calendar]
# slot_min_time = \"08:30:00\"
# slot_max_time = \"17:00:00\"
# locale = \"en-gb\"
# hour12 = false
# list_breakpoint_px = 768

# [server]
# host = \"{DEFAULT_HOST}\"
# port = {DEFAULT_PORT}

# [store]
# table = \"{DEFAULT_TABLE}\"
# timeout_secs = {DEFAULT_TIMEOUT_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
