//! Axum route handlers for the resume builder.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::listing::{self, ListQuery, Page};
use crate::models::resume::{Resume, Section, SectionItem};
use crate::models::user::Role;
use crate::resume::builder::{DraftPatch, DraftView};
use crate::resume::completeness::{compute_completeness, ResumeCompleteness};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct AutosaveToggle {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub item_id: Uuid,
    pub draft: DraftView,
}

/// Loads a resume the caller may edit: their own, or any resume for admins.
async fn owned_resume(
    state: &AppState,
    caller: &CurrentUser,
    resume_id: Uuid,
) -> Result<Resume, AppError> {
    let resume = state
        .resumes
        .get(resume_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    if resume.user_id != caller.user.id && caller.user.role() != Role::Admin {
        return Err(AppError::Forbidden);
    }
    Ok(resume)
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<Resume>> {
    let query = ListQuery::from_params(&params, &state.config)
        .with_filter("user_id", &caller.user.id.to_string());
    Json(listing::apply(state.resumes.list().await, &query))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let mut resume = Resume::blank(caller.user.id, title.to_string());
    resume.personal_info.full_name = caller.user.name.clone();
    resume.personal_info.email = caller.user.email.clone();
    let resume = state.resumes.save(resume).await;

    info!("Created resume {} for user {}", resume.id, caller.user.id);
    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(owned_resume(&state, &caller, resume_id).await?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(resume_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    state.builders.close(resume_id).await;
    state.resumes.remove(resume_id).await;
    info!("Deleted resume {resume_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/draft
pub async fn handle_get_draft(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<DraftView>, AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    Ok(Json(state.builders.draft(resume_id).await?))
}

/// PATCH /api/v1/resumes/:id/draft
pub async fn handle_update_draft(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(resume_id): Path<Uuid>,
    Json(patch): Json<DraftPatch>,
) -> Result<Json<DraftView>, AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    Ok(Json(state.builders.update(resume_id, patch).await?))
}

/// POST /api/v1/resumes/:id/draft/items
pub async fn handle_add_item(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(resume_id): Path<Uuid>,
    Json(item): Json<SectionItem>,
) -> Result<(StatusCode, Json<AddItemResponse>), AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    let (item_id, draft) = state.builders.add_item(resume_id, item).await?;
    Ok((StatusCode::CREATED, Json(AddItemResponse { item_id, draft })))
}

/// PUT /api/v1/resumes/:id/draft/items/:item_id
pub async fn handle_replace_item(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((resume_id, item_id)): Path<(Uuid, Uuid)>,
    Json(item): Json<SectionItem>,
) -> Result<Json<DraftView>, AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    Ok(Json(
        state.builders.replace_item(resume_id, item_id, item).await?,
    ))
}

/// DELETE /api/v1/resumes/:id/draft/:section/:item_id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((resume_id, section, item_id)): Path<(Uuid, Section, Uuid)>,
) -> Result<Json<DraftView>, AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    Ok(Json(
        state
            .builders
            .remove_item(resume_id, section, item_id)
            .await?,
    ))
}

/// PUT /api/v1/resumes/:id/autosave
pub async fn handle_set_autosave(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(resume_id): Path<Uuid>,
    Json(toggle): Json<AutosaveToggle>,
) -> Result<Json<DraftView>, AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    Ok(Json(
        state
            .builders
            .set_autosave(resume_id, toggle.enabled)
            .await?,
    ))
}

/// POST /api/v1/resumes/:id/save
pub async fn handle_save_resume(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    let resume = state.builders.save(resume_id).await?;
    info!("Saved resume {resume_id}");
    Ok(Json(resume))
}

/// GET /api/v1/resumes/:id/completeness
///
/// Scores the open draft, so unsaved edits count.
pub async fn handle_resume_completeness(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeCompleteness>, AppError> {
    owned_resume(&state, &caller, resume_id).await?;
    let draft = state.builders.draft(resume_id).await?;
    Ok(Json(compute_completeness(&draft.resume)))
}
