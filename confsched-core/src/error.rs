//! Error types for confsched.

use thiserror::Error;

/// Errors that can occur in confsched operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Store request failed: {0}")]
    Http(String),

    #[error("Store returned {status}: {message}")]
    Store { status: u16, message: String },

    #[error("Invalid update: {0}")]
    InvalidCandidate(String),

    #[error("End must be after start")]
    EndNotAfterStart,

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Not a conference day: {0}")]
    UnknownDay(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScheduleError {
    /// Errors the operator caused and can fix by editing their input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScheduleError::EndNotAfterStart
                | ScheduleError::EmptyTitle
                | ScheduleError::UnknownDay(_)
                | ScheduleError::InvalidTime(_)
        )
    }
}

impl From<reqwest::Error> for ScheduleError {
    fn from(e: reqwest::Error) -> Self {
        ScheduleError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(e: serde_json::Error) -> Self {
        ScheduleError::Serialization(e.to_string())
    }
}

/// Result type alias for confsched operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
