// Counselor directory and the per-student booking flow.

pub mod handlers;
pub mod picker;

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::appointment::Counselor;
use picker::SlotPicker;

/// Counselors keyed by their string id. Availability is read-only.
pub struct CounselorDirectory {
    counselors: Vec<Counselor>,
}

impl CounselorDirectory {
    pub fn new(counselors: Vec<Counselor>) -> Self {
        Self { counselors }
    }

    pub fn list(&self) -> &[Counselor] {
        &self.counselors
    }

    pub fn get(&self, id: &str) -> Result<&Counselor, AppError> {
        self.counselors
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Counselor {id} not found")))
    }
}

/// One picker per user.
#[derive(Default)]
pub struct AppointmentPickers {
    by_user: RwLock<HashMap<Uuid, SlotPicker>>,
}

impl AppointmentPickers {
    pub async fn get(&self, user_id: Uuid) -> SlotPicker {
        self.by_user
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Runs `step` against the user's picker and returns the resulting state.
    /// A failed step leaves the picker as it was.
    pub async fn update<R>(
        &self,
        user_id: Uuid,
        step: impl FnOnce(&mut SlotPicker) -> Result<R, AppError>,
    ) -> Result<(R, SlotPicker), AppError> {
        let mut by_user = self.by_user.write().await;
        let picker = by_user.entry(user_id).or_default();
        let mut next = picker.clone();
        let out = step(&mut next)?;
        *picker = next.clone();
        Ok((out, next))
    }
}
