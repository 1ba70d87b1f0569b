//! Connection parameters for the hosted event table.

use std::fmt;
use std::sync::Once;

use crate::error::{ScheduleError, ScheduleResult};

/// Environment variable holding the store's base URL.
pub const URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the store's access key.
pub const KEY_VAR: &str = "SUPABASE_KEY";

static DOTENV: Once = Once::new();

/// Where the event table lives and how to authenticate against it.
#[derive(Clone)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
}

impl StoreConfig {
    /// Read both variables, failing if either is missing or blank.
    ///
    /// A `.env` file in the working directory is loaded first, once per
    /// process. Variables already set in the environment take precedence.
    pub fn from_env() -> ScheduleResult<Self> {
        DOTENV.call_once(|| {
            let _ = dotenvy::dotenv();
        });

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ScheduleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ScheduleError::MissingEnv(name))
        };

        let url = read(URL_VAR)?;
        let key = read(KEY_VAR)?;

        url::Url::parse(&url)
            .map_err(|e| ScheduleError::Config(format!("{URL_VAR} is not a valid URL: {e}")))?;

        Ok(StoreConfig {
            url: url.trim_end_matches('/').to_string(),
            key,
        })
    }
}

// The key is a credential; keep it out of logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}
