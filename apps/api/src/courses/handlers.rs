use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::courses::{
    apply_patch, check_module, new_course, remove_module, CourseForm, CoursePatch,
};
use crate::editor::replace_item;
use crate::errors::AppError;
use crate::listing::{self, ListQuery, Page};
use crate::models::course::{Course, CourseModule};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModuleAdded {
    pub module_id: Uuid,
    pub course: Course,
}

async fn find_course(state: &AppState, course_id: Uuid) -> Result<Course, AppError> {
    state
        .courses
        .get(course_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Course {course_id} not found")))
}

/// Runs `edit` against the stored course under its lock.
async fn edit_course(
    state: &AppState,
    course_id: Uuid,
    edit: &(dyn for<'a> Fn(&'a mut Course) -> Result<(), AppError> + Send + Sync),
) -> Result<Course, AppError> {
    state
        .courses
        .try_modify(course_id, edit)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {course_id} not found")))
}

/// GET /api/v1/courses
pub async fn handle_list_courses(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<Course>> {
    let query = ListQuery::from_params(&params, &state.config);
    Json(listing::apply(state.courses.list().await, &query))
}

/// POST /api/v1/courses
pub async fn handle_create_course(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(form): Json<CourseForm>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = state.courses.save(new_course(&caller.user, form)?).await;
    info!("User {} created course {} ({})", caller.user.id, course.id, course.title);
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/v1/courses/:id
pub async fn handle_get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(find_course(&state, course_id).await?))
}

/// PATCH /api/v1/courses/:id
pub async fn handle_update_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(patch): Json<CoursePatch>,
) -> Result<Json<Course>, AppError> {
    let course = edit_course(&state, course_id, &|c: &mut Course| {
        apply_patch(c, patch.clone())
    })
    .await?;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/:id
pub async fn handle_delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .courses
        .remove(course_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Course {course_id} not found")))?;
    info!("Deleted course {course_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/courses/:id/modules
pub async fn handle_add_module(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(mut module): Json<CourseModule>,
) -> Result<(StatusCode, Json<ModuleAdded>), AppError> {
    check_module(&module)?;
    let module_id = Uuid::new_v4();
    module.id = module_id;
    let course = edit_course(&state, course_id, &|c: &mut Course| {
        c.modules.push(module.clone());
        c.updated_at = Utc::now();
        Ok(())
    })
    .await?;
    Ok((StatusCode::CREATED, Json(ModuleAdded { module_id, course })))
}

/// PUT /api/v1/courses/:id/modules/:module_id
pub async fn handle_replace_module(
    State(state): State<AppState>,
    Path((course_id, module_id)): Path<(Uuid, Uuid)>,
    Json(mut module): Json<CourseModule>,
) -> Result<Json<Course>, AppError> {
    check_module(&module)?;
    module.id = module_id;
    let course = edit_course(&state, course_id, &|c: &mut Course| {
        replace_item(&mut c.modules, module.clone())?;
        c.updated_at = Utc::now();
        Ok(())
    })
    .await?;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/:id/modules/:module_id
pub async fn handle_remove_module(
    State(state): State<AppState>,
    Path((course_id, module_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Course>, AppError> {
    let course = edit_course(&state, course_id, &|c: &mut Course| {
        remove_module(c, module_id).map(|_| ())
    })
    .await?;
    Ok(Json(course))
}
