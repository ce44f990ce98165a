use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{CurrentUser, MaybeUser};
use crate::errors::AppError;
use crate::jobs::{apply_patch, duplicate, new_posting, JobForm, JobPatch};
use crate::listing::{self, ListQuery, Page};
use crate::models::job::{JobPosting, JobStatus};
use crate::saved::SavedKind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: JobStatus,
}

#[derive(Debug, Serialize)]
pub struct JobDetail {
    pub job: JobPosting,
    /// Whether the caller has bookmarked this job; false when anonymous.
    pub saved: bool,
}

async fn find_job(state: &AppState, job_id: Uuid) -> Result<JobPosting, AppError> {
    state
        .jobs
        .get(job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// GET /api/v1/jobs
///
/// Student job board: only active postings are listed.
pub async fn handle_job_board(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<JobPosting>> {
    let query =
        ListQuery::from_params(&params, &state.config).with_filter("status", JobStatus::Active.as_str());
    Json(listing::apply(state.jobs.list().await, &query))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobDetail>, AppError> {
    let job = state
        .jobs
        .modify(job_id, &|j: &mut JobPosting| j.views += 1)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let saved = match user {
        Some(user) => state.saved.is_saved(user.id, SavedKind::Job, job_id).await,
        None => false,
    };
    Ok(Json(JobDetail { job, saved }))
}

/// GET /api/v1/employer/jobs
pub async fn handle_list_postings(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<JobPosting>> {
    let query = ListQuery::from_params(&params, &state.config);
    Json(listing::apply(state.jobs.list().await, &query))
}

/// POST /api/v1/employer/jobs
pub async fn handle_create_posting(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(form): Json<JobForm>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    let job = new_posting(&caller.user, form)?;
    let job = state.jobs.save(job).await;
    info!("Employer {} posted job {} ({})", caller.user.id, job.id, job.title);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/employer/jobs/:id
pub async fn handle_get_posting(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobPosting>, AppError> {
    Ok(Json(find_job(&state, job_id).await?))
}

/// PATCH /api/v1/employer/jobs/:id
pub async fn handle_update_posting(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(patch): Json<JobPatch>,
) -> Result<Json<JobPosting>, AppError> {
    let job = state
        .jobs
        .try_modify(job_id, &|j: &mut JobPosting| apply_patch(j, patch.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(job))
}

/// PATCH /api/v1/employer/jobs/:id/status
pub async fn handle_set_posting_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(change): Json<StatusChange>,
) -> Result<Json<JobPosting>, AppError> {
    let status = change.status;
    let job = state
        .jobs
        .modify(job_id, &move |j: &mut JobPosting| j.status = status)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    info!("Job {job_id} status set to {}", status.as_str());
    Ok(Json(job))
}

/// POST /api/v1/employer/jobs/:id/duplicate
pub async fn handle_duplicate_posting(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    let original = find_job(&state, job_id).await?;
    let copy = state.jobs.save(duplicate(&original)).await;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// DELETE /api/v1/employer/jobs/:id
pub async fn handle_delete_posting(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .jobs
        .remove(job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    info!("Deleted job {job_id}");
    Ok(StatusCode::NO_CONTENT)
}
