//! Event CRUD endpoints for UI frontends.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use termin_core::event::{Event, EventDraft, sort_by_start};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
}

/// GET /events - all events, sorted ascending by start date
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let mut events = state.store.list_events().await?;
    sort_by_start(&mut events);
    Ok(Json(events))
}

/// POST /events - create a new event
async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<Event>, AppError> {
    draft.validate()?;
    let event = state.store.insert_event(draft).await?;
    Ok(Json(event))
}

/// PUT /events/:id - whole-record replacement of the editable fields
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<EventDraft>,
) -> Result<StatusCode, AppError> {
    draft.validate()?;
    state.store.update_event(&id, draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /events/:id
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_event(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
