//! Counselor → date → time-slot selection flow for booking an appointment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::appointment::Counselor;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentTab {
    #[default]
    Book,
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Human-readable date used in booking messages, e.g. "Friday, June 27, 2025".
pub fn readable_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Selection state for one user. Each step narrows the next: choosing a
/// counselor clears the date and slot, choosing a date clears the slot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SlotPicker {
    pub tab: AppointmentTab,
    pub counselor: Option<Counselor>,
    pub date: Option<NaiveDate>,
    pub slot: Option<String>,
}

impl SlotPicker {
    pub fn select_counselor(&mut self, counselor: Counselor) {
        self.counselor = Some(counselor);
        self.date = None;
        self.slot = None;
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), AppError> {
        let counselor = self
            .counselor
            .as_ref()
            .ok_or_else(|| AppError::Validation("select a counselor first".to_string()))?;
        if counselor.slots_on(date).is_none() {
            return Err(AppError::Validation(format!(
                "{} has no availability on {date}",
                counselor.name
            )));
        }
        self.date = Some(date);
        self.slot = None;
        Ok(())
    }

    pub fn select_slot(&mut self, slot: &str) -> Result<(), AppError> {
        let (Some(counselor), Some(date)) = (self.counselor.as_ref(), self.date) else {
            return Err(AppError::Validation(
                "select a counselor and date first".to_string(),
            ));
        };
        let offered = counselor
            .slots_on(date)
            .is_some_and(|slots| slots.iter().any(|s| s == slot));
        if !offered {
            return Err(AppError::Validation(format!(
                "{slot} is not an available slot on {date}"
            )));
        }
        self.slot = Some(slot.to_string());
        Ok(())
    }

    /// Dates offered by the selected counselor, empty before one is chosen.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.counselor
            .as_ref()
            .map(Counselor::available_dates)
            .unwrap_or_default()
    }

    /// Slots for the selected date.
    pub fn available_slots(&self) -> Vec<String> {
        match (self.counselor.as_ref(), self.date) {
            (Some(counselor), Some(date)) => {
                counselor.slots_on(date).map(<[String]>::to_vec).unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }

    /// Books the selected slot. Availability is left untouched, so the
    /// same slot stays bookable.
    pub fn confirm(&mut self) -> Result<Notification, AppError> {
        let (Some(counselor), Some(date), Some(slot)) =
            (self.counselor.as_ref(), self.date, self.slot.as_ref())
        else {
            return Err(AppError::Validation(
                "counselor, date and time slot are all required".to_string(),
            ));
        };

        let notification = Notification {
            kind: NotificationKind::Success,
            title: "Appointment booked".to_string(),
            message: format!(
                "Your appointment with {} on {} at {} has been scheduled.",
                counselor.name,
                readable_date(date),
                slot
            ),
        };

        self.tab = AppointmentTab::Upcoming;
        self.counselor = None;
        self.date = None;
        self.slot = None;
        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::SeedData;

    fn counselor(id: &str) -> Counselor {
        SeedData::mock()
            .counselors
            .into_iter()
            .find(|c| c.id == id)
            .unwrap()
    }

    fn june(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_booking_flow() {
        let mut picker = SlotPicker::default();
        picker.select_counselor(counselor("1"));
        picker.select_date(june(27)).unwrap();
        picker.select_slot("2:00 PM").unwrap();

        let note = picker.confirm().unwrap();
        assert!(note.message.contains("Dr. Michael Rodriguez"));
        assert!(note.message.contains("2:00 PM"));
        assert!(note.message.contains("June 27, 2025"));
        assert_eq!(picker.tab, AppointmentTab::Upcoming);
        assert!(picker.counselor.is_none());
        assert!(picker.date.is_none());
        assert!(picker.slot.is_none());
    }

    #[test]
    fn test_availability_untouched_after_booking() {
        let michael = counselor("1");
        let mut picker = SlotPicker::default();
        for _ in 0..2 {
            picker.select_counselor(michael.clone());
            picker.select_date(june(27)).unwrap();
            picker.select_slot("2:00 PM").unwrap();
            picker.confirm().unwrap();
        }
        assert_eq!(michael.slots_on(june(27)).unwrap().len(), 4);
    }

    #[test]
    fn test_changing_counselor_clears_date_and_slot() {
        let mut picker = SlotPicker::default();
        picker.select_counselor(counselor("1"));
        picker.select_date(june(27)).unwrap();
        picker.select_slot("10:00 AM").unwrap();

        picker.select_counselor(counselor("2"));
        assert!(picker.date.is_none());
        assert!(picker.slot.is_none());
        assert_eq!(picker.available_dates(), vec![june(26), june(28)]);
    }

    #[test]
    fn test_changing_date_clears_slot() {
        let mut picker = SlotPicker::default();
        picker.select_counselor(counselor("1"));
        picker.select_date(june(27)).unwrap();
        picker.select_slot("10:00 AM").unwrap();
        picker.select_date(june(30)).unwrap();
        assert!(picker.slot.is_none());
        assert_eq!(picker.available_slots(), vec!["9:30 AM", "1:00 PM"]);
    }

    #[test]
    fn test_rejects_unoffered_choices() {
        let mut picker = SlotPicker::default();
        assert!(picker.select_date(june(27)).is_err());

        picker.select_counselor(counselor("1"));
        assert!(picker.select_date(june(26)).is_err());
        picker.select_date(june(27)).unwrap();
        assert!(picker.select_slot("9:00 AM").is_err());
    }

    #[test]
    fn test_confirm_requires_all_selections() {
        let mut picker = SlotPicker::default();
        picker.select_counselor(counselor("1"));
        picker.select_date(june(27)).unwrap();
        assert!(picker.confirm().is_err());
        assert_eq!(picker.tab, AppointmentTab::Book);
        assert!(picker.date.is_some());
    }
}
