use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::counselor::{apply_update, ConsultationUpdate, StudentDetail};
use crate::errors::AppError;
use crate::listing::{self, ListQuery, Page};
use crate::models::appointment::Consultation;
use crate::models::event::Registration;
use crate::models::resume::Resume;
use crate::models::user::{Role, User};
use crate::state::AppState;

/// GET /api/v1/counselor/students
pub async fn handle_list_students(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<User>> {
    let query =
        ListQuery::from_params(&params, &state.config).with_filter("role", Role::Student.as_str());
    Json(listing::apply(state.users.list().await, &query))
}

/// GET /api/v1/counselor/students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentDetail>, AppError> {
    let student = state
        .users
        .get(student_id)
        .await
        .filter(|u| u.role() == Role::Student)
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

    let resume_count = state
        .resumes
        .find(&move |r: &Resume| r.user_id == student_id)
        .await
        .len();
    let event_registrations = state
        .registrations
        .find(&move |r: &Registration| r.student_id == student_id)
        .await
        .len();
    let consultations = state
        .consultations
        .find(&move |c: &Consultation| c.student_id == student_id)
        .await;

    Ok(Json(StudentDetail {
        student,
        resume_count,
        event_registrations,
        consultations,
    }))
}

/// GET /api/v1/counselor/consultations
pub async fn handle_list_consultations(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<Consultation>> {
    let query = ListQuery::from_params(&params, &state.config);
    Json(listing::apply(state.consultations.list().await, &query))
}

/// PATCH /api/v1/counselor/consultations/:id
pub async fn handle_update_consultation(
    State(state): State<AppState>,
    Path(consultation_id): Path<Uuid>,
    Json(update): Json<ConsultationUpdate>,
) -> Result<Json<Consultation>, AppError> {
    let consultation = state
        .consultations
        .modify(consultation_id, &|c: &mut Consultation| {
            apply_update(c, update.clone())
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("Consultation {consultation_id} not found")))?;
    info!(
        "Consultation {consultation_id} is now {}",
        consultation.status.as_str()
    );
    Ok(Json(consultation))
}
