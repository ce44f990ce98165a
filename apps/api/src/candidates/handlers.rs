use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::candidates::selection::{bulk_update_status, BulkUpdateResult};
use crate::candidates::{new_note, summarize, validate_rating, PipelineSummary};
use crate::errors::AppError;
use crate::listing::{self, ListQuery, Page};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: CandidateStatus,
}

#[derive(Debug, Deserialize)]
pub struct RatingChange {
    pub rating: u8,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionToggle {
    pub candidate_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct BulkStatusRequest {
    pub status: CandidateStatus,
    /// When present, replaces the caller's current selection first.
    pub candidate_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct CandidateDetail {
    pub candidate: Candidate,
    /// Suggested next pipeline stages; any status may still be set.
    pub next_stages: &'static [CandidateStatus],
}

fn not_found(candidate_id: Uuid) -> AppError {
    AppError::NotFound(format!("Candidate {candidate_id} not found"))
}

/// GET /api/v1/employer/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<Candidate>> {
    let query = ListQuery::from_params(&params, &state.config);
    Json(listing::apply(state.candidates.list().await, &query))
}

/// GET /api/v1/employer/candidates/summary
pub async fn handle_pipeline_summary(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<PipelineSummary> {
    // summary honours the same filters as the list, minus pagination
    let mut query = ListQuery::from_params(&params, &state.config);
    query.page = 1;
    query.page_size = usize::MAX;
    let rows = listing::apply(state.candidates.list().await, &query).items;
    Json(summarize(&rows))
}

/// GET /api/v1/employer/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<CandidateDetail>, AppError> {
    let candidate = state
        .candidates
        .get(candidate_id)
        .await
        .ok_or_else(|| not_found(candidate_id))?;
    Ok(Json(CandidateDetail {
        next_stages: candidate.status.next_stages(),
        candidate,
    }))
}

/// PATCH /api/v1/employer/candidates/:id/status
pub async fn handle_set_candidate_status(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(change): Json<StatusChange>,
) -> Result<Json<Candidate>, AppError> {
    let status = change.status;
    let candidate = state
        .candidates
        .modify(candidate_id, &move |c: &mut Candidate| c.status = status)
        .await
        .ok_or_else(|| not_found(candidate_id))?;
    info!("Candidate {candidate_id} moved to {}", status.as_str());
    Ok(Json(candidate))
}

/// PUT /api/v1/employer/candidates/:id/rating
pub async fn handle_rate_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(change): Json<RatingChange>,
) -> Result<Json<Candidate>, AppError> {
    let rating = validate_rating(change.rating)?;
    let candidate = state
        .candidates
        .modify(candidate_id, &move |c: &mut Candidate| c.rating = Some(rating))
        .await
        .ok_or_else(|| not_found(candidate_id))?;
    Ok(Json(candidate))
}

/// POST /api/v1/employer/candidates/:id/notes
pub async fn handle_add_note(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(candidate_id): Path<Uuid>,
    Json(request): Json<NoteRequest>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    let note = new_note(&caller.user.name, &request.body)?;
    let candidate = state
        .candidates
        .modify(candidate_id, &move |c: &mut Candidate| c.notes.push(note.clone()))
        .await
        .ok_or_else(|| not_found(candidate_id))?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// GET /api/v1/employer/candidates/selection
pub async fn handle_get_selection(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Json<Vec<Uuid>> {
    Json(state.selections.get(caller.user.id).await)
}

/// POST /api/v1/employer/candidates/selection/toggle
pub async fn handle_toggle_selection(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(toggle): Json<SelectionToggle>,
) -> Result<Json<Vec<Uuid>>, AppError> {
    if state.candidates.get(toggle.candidate_id).await.is_none() {
        return Err(not_found(toggle.candidate_id));
    }
    Ok(Json(
        state
            .selections
            .toggle(caller.user.id, toggle.candidate_id)
            .await,
    ))
}

/// POST /api/v1/employer/candidates/selection/all
///
/// Selects every candidate matching the list filters in the query string.
pub async fn handle_select_all(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Uuid>> {
    let query = ListQuery::from_params(&params, &state.config);
    let ids = state
        .candidates
        .list()
        .await
        .into_iter()
        .filter(|c| query.matches(c))
        .map(|c| c.id)
        .collect();
    Json(state.selections.replace(caller.user.id, ids).await)
}

/// DELETE /api/v1/employer/candidates/selection
pub async fn handle_clear_selection(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> StatusCode {
    state.selections.clear(caller.user.id).await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/employer/candidates/bulk-status
pub async fn handle_bulk_status(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(request): Json<BulkStatusRequest>,
) -> Result<Json<BulkUpdateResult>, AppError> {
    if let Some(ids) = request.candidate_ids {
        state.selections.replace(caller.user.id, ids).await;
    }
    let result = bulk_update_status(
        state.candidates.as_ref(),
        &state.selections,
        caller.user.id,
        request.status,
        Duration::from_millis(state.config.simulated_latency_ms),
    )
    .await?;
    Ok(Json(result))
}
