//! Schedule and edit pages

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    response::Html,
    routing::get,
};

use confsched_core::UpdateCandidate;
use confsched_core::page::PageController;
use confsched_core::view::CalendarEntry;

use crate::render;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedule_page))
        .route("/edit", get(edit_page))
        .route("/calendar/feed", get(calendar_feed))
}

/// GET / - The drag-and-drop schedule.
///
/// Still honours `?updated_event=<json>` from older copies of the page.
/// The move is applied once, on this request only.
async fn schedule_page(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, AppError> {
    let pending = query.as_deref().and_then(UpdateCandidate::from_query);

    let page = PageController::new(state.store.as_ref(), &state.view)
        .load(pending)
        .await?;

    Ok(Html(render::schedule_page(&page)))
}

/// GET /edit - Add and delete events.
async fn edit_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let events = state.store.list_events().await?;
    Ok(Html(render::edit_page(&events, &state.week)))
}

/// GET /calendar/feed - Fresh widget entries after a move.
async fn calendar_feed(State(state): State<AppState>) -> Result<Json<Vec<CalendarEntry>>, AppError> {
    let events = state.store.list_events().await?;
    Ok(Json(events.iter().map(CalendarEntry::from).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use confsched_core::config::ScheduleConfig;
    use confsched_core::store::{EventStore, MemoryStore};
    use confsched_core::{Colour, NewEvent};
    use tower::ServiceExt;

    use crate::routes;
    use crate::state::AppState;

    async fn seeded() -> Arc<MemoryStore> {
        let day = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let store = Arc::new(MemoryStore::new());
        store
            .insert_event(&NewEvent {
                title: "Keynote".into(),
                start: day.and_hms_opt(9, 0, 0).unwrap(),
                end: day.and_hms_opt(10, 0, 0).unwrap(),
                colour: Colour::new("#000000"),
            })
            .await
            .unwrap();
        store
    }

    fn app(store: Arc<MemoryStore>) -> axum::Router {
        routes::router().with_state(AppState::with_store(store, &ScheduleConfig::default()))
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_schedule_page_embeds_events() {
        let (status, html) = get(app(seeded().await), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Conference Schedule"));
        assert!(html.contains("\"title\":\"Keynote\""));
        assert!(html.contains("\"textColor\":\"white\""));
    }

    #[tokio::test]
    async fn test_legacy_query_param_applies_move_once() {
        let store = seeded().await;
        // {"id":1,"title":"Keynote","start":"2025-12-01T10:00:00","end":"2025-12-01T11:00:00"}
        let uri = "/?updated_event=%7B%22id%22%3A1%2C%22title%22%3A%22Keynote%22%2C%22start%22%3A%222025-12-01T10%3A00%3A00%22%2C%22end%22%3A%222025-12-01T11%3A00%3A00%22%7D";

        let (status, html) = get(app(store.clone()), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Updated: Keynote"));

        let events = store.list_events().await.unwrap();
        assert_eq!(events[0].start.format("%H:%M").to_string(), "10:00");
        assert_eq!(events[0].title, "Keynote");
        assert_eq!(events[0].colour.as_str(), "#000000");

        // The next plain load carries no notice: nothing was kept around.
        let (_, html) = get(app(store), "/").await;
        assert!(!html.contains("Updated: Keynote"));
    }

    #[tokio::test]
    async fn test_malformed_param_shows_error_but_renders() {
        let (status, html) = get(app(seeded().await), "/?updated_event=%7Bbad").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Invalid update"));
        assert!(html.contains("\"title\":\"Keynote\""));
    }

    #[tokio::test]
    async fn test_edit_page_lists_events_and_days() {
        let (status, html) = get(app(seeded().await), "/edit").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Keynote"));
        assert!(html.contains("Monday"));
        assert!(html.contains("Friday"));
    }

    #[tokio::test]
    async fn test_edit_page_empty() {
        let (_, html) = get(app(Arc::new(MemoryStore::new())), "/edit").await;
        assert!(html.contains("No events yet."));
    }

    #[tokio::test]
    async fn test_feed_returns_entries() {
        let (status, body) = get(app(seeded().await), "/calendar/feed").await;

        assert_eq!(status, StatusCode::OK);
        let entries: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(entries[0]["id"], "1");
        assert_eq!(entries[0]["backgroundColor"], "#000000");
    }
}
