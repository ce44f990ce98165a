use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::appointments::picker::{AppointmentTab, Notification, SlotPicker};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::listing::{self, ListQuery, Page};
use crate::models::appointment::{Consultation, ConsultationStatus, Counselor};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CounselorAvailability {
    pub counselor_id: String,
    pub name: String,
    pub dates: Vec<AvailableDate>,
}

#[derive(Debug, Serialize)]
pub struct AvailableDate {
    pub date: NaiveDate,
    pub slots: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PickerView {
    #[serde(flatten)]
    pub picker: SlotPicker,
    pub available_dates: Vec<NaiveDate>,
    pub available_slots: Vec<String>,
}

impl From<SlotPicker> for PickerView {
    fn from(picker: SlotPicker) -> Self {
        PickerView {
            available_dates: picker.available_dates(),
            available_slots: picker.available_slots(),
            picker,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub notification: Notification,
    pub picker: PickerView,
}

#[derive(Debug, Deserialize)]
pub struct CounselorChoice {
    pub counselor_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DateChoice {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct SlotChoice {
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub counselor_id: String,
    pub date: NaiveDate,
    pub time: String,
}

/// GET /api/v1/counselors
pub async fn handle_list_counselors(State(state): State<AppState>) -> Json<Vec<Counselor>> {
    Json(state.counselors.list().to_vec())
}

/// GET /api/v1/counselors/:id/availability
pub async fn handle_counselor_availability(
    State(state): State<AppState>,
    Path(counselor_id): Path<String>,
) -> Result<Json<CounselorAvailability>, AppError> {
    let counselor = state.counselors.get(&counselor_id)?;
    Ok(Json(CounselorAvailability {
        counselor_id: counselor.id.clone(),
        name: counselor.name.clone(),
        dates: counselor
            .availability
            .iter()
            .map(|(date, slots)| AvailableDate {
                date: *date,
                slots: slots.clone(),
            })
            .collect(),
    }))
}

/// GET /api/v1/appointments/picker
pub async fn handle_get_picker(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Json<PickerView> {
    Json(state.pickers.get(caller.user.id).await.into())
}

/// POST /api/v1/appointments/picker/counselor
pub async fn handle_pick_counselor(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(choice): Json<CounselorChoice>,
) -> Result<Json<PickerView>, AppError> {
    let counselor = state.counselors.get(&choice.counselor_id)?.clone();
    let ((), picker) = state
        .pickers
        .update(caller.user.id, |p| {
            p.select_counselor(counselor);
            Ok(())
        })
        .await?;
    Ok(Json(picker.into()))
}

/// POST /api/v1/appointments/picker/date
pub async fn handle_pick_date(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(choice): Json<DateChoice>,
) -> Result<Json<PickerView>, AppError> {
    let ((), picker) = state
        .pickers
        .update(caller.user.id, |p| p.select_date(choice.date))
        .await?;
    Ok(Json(picker.into()))
}

/// POST /api/v1/appointments/picker/slot
pub async fn handle_pick_slot(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(choice): Json<SlotChoice>,
) -> Result<Json<PickerView>, AppError> {
    let ((), picker) = state
        .pickers
        .update(caller.user.id, |p| p.select_slot(&choice.time))
        .await?;
    Ok(Json(picker.into()))
}

/// POST /api/v1/appointments/picker/confirm
pub async fn handle_confirm_booking(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<Json<BookingConfirmation>, AppError> {
    let (notification, picker) = state
        .pickers
        .update(caller.user.id, SlotPicker::confirm)
        .await?;
    info!("User {} booked: {}", caller.user.id, notification.message);
    Ok(Json(BookingConfirmation {
        notification,
        picker: picker.into(),
    }))
}

/// POST /api/v1/appointments/book
///
/// Runs the whole selection flow in one request.
pub async fn handle_book(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let counselor = state.counselors.get(&request.counselor_id)?.clone();
    let (notification, picker) = state
        .pickers
        .update(caller.user.id, |p| {
            p.select_counselor(counselor);
            p.select_date(request.date)?;
            p.select_slot(&request.time)?;
            p.confirm()
        })
        .await?;
    info!("User {} booked: {}", caller.user.id, notification.message);
    Ok(Json(BookingConfirmation {
        notification,
        picker: picker.into(),
    }))
}

/// GET /api/v1/appointments?tab=upcoming|past
///
/// The caller's consultations. `upcoming` is the scheduled ones, `past`
/// everything else; without a tab all are returned.
pub async fn handle_my_appointments(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<Json<Page<Consultation>>, AppError> {
    let tab = match params.remove("tab").as_deref() {
        None | Some("all") => None,
        Some("upcoming") => Some(AppointmentTab::Upcoming),
        Some("past") => Some(AppointmentTab::Past),
        Some(other) => {
            return Err(AppError::Validation(format!("unknown tab '{other}'")));
        }
    };

    let query = ListQuery::from_params(&params, &state.config)
        .with_filter("student_id", &caller.user.id.to_string());
    let rows = state
        .consultations
        .list()
        .await
        .into_iter()
        .filter(|c| {
            let scheduled = c.status == ConsultationStatus::Scheduled;
            match tab {
                Some(AppointmentTab::Upcoming) => scheduled,
                Some(AppointmentTab::Past) => !scheduled,
                _ => true,
            }
        })
        .collect();
    Ok(Json(listing::apply(rows, &query)))
}
