use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Listable, SortKey};
use crate::store::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Draft,
    Closed,
    Paused,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Draft => "draft",
            JobStatus::Closed => "closed",
            JobStatus::Paused => "paused",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Internship,
    Contract,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Internship => "internship",
            JobType::Contract => "contract",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub salary_range: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub status: JobStatus,
    /// Display counter; not derived from candidate records.
    #[serde(default)]
    pub applications: u32,
    #[serde(default)]
    pub views: u32,
    pub posted_at: DateTime<Utc>,
    pub deadline: Option<NaiveDate>,
}

impl Record for JobPosting {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for JobPosting {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.company.as_str(),
            self.location.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_string()),
            "job_type" => Some(self.job_type.as_str().to_string()),
            "employer_id" => Some(self.employer_id.to_string()),
            "location" => Some(self.location.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "title" => Some(SortKey::text(&self.title)),
            "company" => Some(SortKey::text(&self.company)),
            "posted_at" => Some(SortKey::Time(self.posted_at)),
            "deadline" => Some(SortKey::optional(self.deadline, SortKey::Date)),
            "applications" => Some(SortKey::number(self.applications)),
            "views" => Some(SortKey::number(self.views)),
            _ => None,
        }
    }
}
