//! Event endpoints

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Serialize;

use confsched_core::candidate::Reschedule;
use confsched_core::form::AddEventForm;
use confsched_core::reconcile::reconcile;
use confsched_core::{Event, EventId, Notice};

use crate::routes::{AppError, json_body};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(add_event))
        .route("/events/{id}", delete(delete_event))
        .route("/events/{id}/reschedule", post(reschedule_event))
}

/// Outcome of a mutation, for display
#[derive(Serialize)]
pub struct NoticeResponse {
    pub notice: Notice,
    pub message: String,
}

impl From<Notice> for NoticeResponse {
    fn from(notice: Notice) -> Self {
        NoticeResponse {
            message: notice.to_string(),
            notice,
        }
    }
}

/// GET /events - Every event in the table
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.store.list_events().await?))
}

/// POST /events - Add an event from the edit form
async fn add_event(
    State(state): State<AppState>,
    form: Result<Json<AddEventForm>, JsonRejection>,
) -> Result<(StatusCode, Json<NoticeResponse>), AppError> {
    let event = json_body(form)?.validate(&state.week)?;

    state.store.insert_event(&event).await?;
    tracing::info!(title = %event.title, start = %event.start, "event added");

    Ok((
        StatusCode::CREATED,
        Json(Notice::Added(event.title).into()),
    ))
}

/// DELETE /events/:id - Remove an event (missing ids are not an error)
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NoticeResponse>, AppError> {
    let id = EventId::new(id);

    state.store.delete_event(&id).await?;
    tracing::info!(%id, "event deleted");

    Ok(Json(Notice::Deleted(id).into()))
}

/// POST /events/:id/reschedule - Apply a drag or resize from the calendar
async fn reschedule_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Reschedule>, JsonRejection>,
) -> Result<Json<NoticeResponse>, AppError> {
    let candidate = json_body(body)?.into_candidate(EventId::new(id))?;
    let notice = reconcile(state.store.as_ref(), candidate).await?;
    Ok(Json(notice.into()))
}
