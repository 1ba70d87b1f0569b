pub mod events;
pub mod schedule;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

use confsched_core::ScheduleError;

use crate::state::AppState;

/// Every route the server exposes.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(schedule::router())
        .merge(events::router())
        .route("/health", get(health))
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert anyhow errors to HTTP responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<ScheduleError>() {
            Some(e) if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
            Some(ScheduleError::InvalidCandidate(_) | ScheduleError::MalformedBody(_)) => {
                StatusCode::BAD_REQUEST
            }
            Some(ScheduleError::Store { .. } | ScheduleError::Http(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, %status, "request failed");
        } else {
            tracing::warn!(error = %self.0, %status, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Take a JSON body, answering a malformed one with 400 and the usual error body.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ScheduleError::MalformedBody(rejection.body_text()).into()),
    }
}
