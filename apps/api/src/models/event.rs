use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Listable, SortKey};
use crate::store::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CareerFair,
    Workshop,
    InfoSession,
    Networking,
    Webinar,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::CareerFair => "career_fair",
            EventType::Workshop => "workshop",
            EventType::InfoSession => "info_session",
            EventType::Networking => "networking",
            EventType::Webinar => "webinar",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub location: String,
    #[serde(default)]
    pub is_virtual: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: u32,
    /// Counter maintained alongside the registrations collection.
    #[serde(default)]
    pub registered: u32,
    pub status: EventStatus,
}

impl Event {
    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }

    pub fn fill_rate(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.registered as f64 / self.capacity as f64
    }
}

impl Record for Event {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for Event {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.location.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_string()),
            "event_type" => Some(self.event_type.as_str().to_string()),
            "organizer_id" => Some(self.organizer_id.to_string()),
            "is_virtual" => Some(self.is_virtual.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "title" => Some(SortKey::text(&self.title)),
            "starts_at" => Some(SortKey::Time(self.starts_at)),
            "capacity" => Some(SortKey::number(self.capacity)),
            "registered" => Some(SortKey::number(self.registered)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    /// Join key into the events collection.
    pub event_id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub attended: bool,
}

impl Record for Registration {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for Registration {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.student_name.as_str(), self.email.as_str()]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "attended" => Some(self.attended.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "student_name" => Some(SortKey::text(&self.student_name)),
            "registered_at" => Some(SortKey::Time(self.registered_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spots_left_saturates() {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            organizer_id: Uuid::new_v4(),
            title: "Fair".into(),
            description: String::new(),
            event_type: EventType::CareerFair,
            location: "Gym".into(),
            is_virtual: false,
            starts_at: now,
            ends_at: now,
            capacity: 10,
            registered: 12,
            status: EventStatus::Upcoming,
        };
        assert_eq!(event.spots_left(), 0);
        assert!((event.fill_rate() - 1.2).abs() < 1e-9);
    }
}
