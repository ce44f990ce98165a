use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::SubRecord;
use crate::listing::{Listable, SortKey};
use crate::store::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
            CourseStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseModule {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub title: String,
    pub duration_minutes: u32,
}

impl SubRecord for CourseModule {
    fn id(&self) -> Uuid {
        self.id
    }
    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: CourseStatus,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn total_minutes(&self) -> u32 {
        self.modules.iter().map(|m| m.duration_minutes).sum()
    }
}

impl Record for Course {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for Course {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_string()),
            "category" => Some(self.category.clone()),
            "instructor_id" => Some(self.instructor_id.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "title" => Some(SortKey::text(&self.title)),
            "created_at" => Some(SortKey::Time(self.created_at)),
            "updated_at" => Some(SortKey::Time(self.updated_at)),
            "duration" => Some(SortKey::number(self.total_minutes())),
            _ => None,
        }
    }
}
