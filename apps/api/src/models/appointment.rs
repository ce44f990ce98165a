use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Listable, SortKey};
use crate::store::Record;

/// A counselor with a static availability map: date → time-of-day slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counselor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub specialization: String,
    #[serde(default)]
    pub availability: BTreeMap<NaiveDate, Vec<String>>,
}

impl Counselor {
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.availability.keys().copied().collect()
    }

    pub fn slots_on(&self, date: NaiveDate) -> Option<&[String]> {
        self.availability.get(&date).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl ConsultationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStatus::Scheduled => "scheduled",
            ConsultationStatus::Completed => "completed",
            ConsultationStatus::Cancelled => "cancelled",
            ConsultationStatus::NoShow => "no_show",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub counselor_id: String,
    pub counselor_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub topic: String,
    pub status: ConsultationStatus,
    #[serde(default)]
    pub notes: String,
}

impl Record for Consultation {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for Consultation {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.student_name.as_str(),
            self.counselor_name.as_str(),
            self.topic.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_string()),
            "counselor_id" => Some(self.counselor_id.clone()),
            "student_id" => Some(self.student_id.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "date" => Some(SortKey::Date(self.date)),
            "student_name" => Some(SortKey::text(&self.student_name)),
            "topic" => Some(SortKey::text(&self.topic)),
            _ => None,
        }
    }
}
