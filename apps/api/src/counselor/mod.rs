// Counselor views: the student directory and consultation records.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::editor::merge;
use crate::models::appointment::{Consultation, ConsultationStatus};
use crate::models::user::User;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultationUpdate {
    pub status: Option<ConsultationStatus>,
    pub notes: Option<String>,
}

pub fn apply_update(consultation: &mut Consultation, update: ConsultationUpdate) {
    merge(&mut consultation.status, update.status);
    merge(&mut consultation.notes, update.notes);
}

/// A student with the records a counselor looks at alongside them.
#[derive(Debug, Serialize)]
pub struct StudentDetail {
    pub student: User,
    pub resume_count: usize,
    pub event_registrations: usize,
    pub consultations: Vec<Consultation>,
}
