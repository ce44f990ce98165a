use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::events::{
    apply_patch, new_event, register, registrations_for, stats, unregister, EventForm, EventPatch,
    EventStats,
};
use crate::listing::{self, ListQuery, Page};
use crate::models::event::{Event, EventStatus, Registration};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AttendanceChange {
    pub attended: bool,
}

async fn find_event(state: &AppState, event_id: Uuid) -> Result<Event, AppError> {
    state
        .events
        .get(event_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))
}

/// GET /api/v1/events
pub async fn handle_list_events(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<Event>> {
    let query = ListQuery::from_params(&params, &state.config);
    Json(listing::apply(state.events.list().await, &query))
}

/// POST /api/v1/events
pub async fn handle_create_event(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(form): Json<EventForm>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = state.events.save(new_event(&caller.user, form)?).await;
    info!("User {} created event {} ({})", caller.user.id, event.id, event.title);
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events/:id
pub async fn handle_get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(find_event(&state, event_id).await?))
}

/// PATCH /api/v1/events/:id
pub async fn handle_update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .events
        .try_modify(event_id, &|e: &mut Event| apply_patch(e, patch.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))?;
    Ok(Json(event))
}

/// POST /api/v1/events/:id/cancel
pub async fn handle_cancel_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .events
        .modify(event_id, &|e: &mut Event| e.status = EventStatus::Cancelled)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))?;
    info!("Cancelled event {event_id}");
    Ok(Json(event))
}

/// DELETE /api/v1/events/:id
///
/// Registrations for the event are dropped with it.
pub async fn handle_delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .events
        .remove(event_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))?;

    let orphaned = registrations_for(state.registrations.as_ref(), event_id).await;
    for registration in &orphaned {
        state.registrations.remove(registration.id).await;
    }
    info!(
        "Deleted event {event_id} and {} registrations",
        orphaned.len()
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/events/:id/registrations
pub async fn handle_list_registrations(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<Registration>>, AppError> {
    find_event(&state, event_id).await?;
    let query = ListQuery::from_params(&params, &state.config);
    let rows = registrations_for(state.registrations.as_ref(), event_id).await;
    Ok(Json(listing::apply(rows, &query)))
}

/// POST /api/v1/events/:id/register
pub async fn handle_register(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Registration>), AppError> {
    let registration = register(
        state.events.as_ref(),
        state.registrations.as_ref(),
        event_id,
        &caller.user,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// DELETE /api/v1/events/:id/register
pub async fn handle_unregister(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    unregister(
        state.events.as_ref(),
        state.registrations.as_ref(),
        event_id,
        caller.user.id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/registrations/:id/attendance
pub async fn handle_set_attendance(
    State(state): State<AppState>,
    Path(registration_id): Path<Uuid>,
    Json(change): Json<AttendanceChange>,
) -> Result<Json<Registration>, AppError> {
    let attended = change.attended;
    let registration = state
        .registrations
        .modify(registration_id, &move |r: &mut Registration| {
            r.attended = attended
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("Registration {registration_id} not found")))?;
    Ok(Json(registration))
}

/// GET /api/v1/events/:id/stats
pub async fn handle_event_stats(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventStats>, AppError> {
    let event = find_event(&state, event_id).await?;
    let rows = registrations_for(state.registrations.as_ref(), event_id).await;
    Ok(Json(stats(&event, &rows)))
}
