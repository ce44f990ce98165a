use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Listable, SortKey};
use crate::store::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Applied,
    Review,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 6] = [
        CandidateStatus::Applied,
        CandidateStatus::Review,
        CandidateStatus::Interview,
        CandidateStatus::Offer,
        CandidateStatus::Hired,
        CandidateStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Applied => "applied",
            CandidateStatus::Review => "review",
            CandidateStatus::Interview => "interview",
            CandidateStatus::Offer => "offer",
            CandidateStatus::Hired => "hired",
            CandidateStatus::Rejected => "rejected",
        }
    }

    /// Stages a candidate nominally moves to next. Informational only:
    /// status updates are not checked against it.
    pub fn next_stages(&self) -> &'static [CandidateStatus] {
        match self {
            CandidateStatus::Applied => &[CandidateStatus::Review, CandidateStatus::Rejected],
            CandidateStatus::Review => &[CandidateStatus::Interview, CandidateStatus::Rejected],
            CandidateStatus::Interview => &[CandidateStatus::Offer, CandidateStatus::Rejected],
            CandidateStatus::Offer => &[CandidateStatus::Hired, CandidateStatus::Rejected],
            CandidateStatus::Hired | CandidateStatus::Rejected => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewNote {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub email: String,
    pub university: String,
    pub major: String,
    pub gpa: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub status: CandidateStatus,
    /// 1..=5 when rated.
    pub rating: Option<u8>,
    #[serde(default)]
    pub notes: Vec<InterviewNote>,
    pub applied_at: DateTime<Utc>,
}

impl Record for Candidate {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for Candidate {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.university.as_str(),
            self.major.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_string()),
            "job_id" => Some(self.job_id.to_string()),
            "university" => Some(self.university.clone()),
            "rating" => Some(
                self.rating
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "unrated".to_string()),
            ),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::text(&self.name)),
            "applied_at" => Some(SortKey::Time(self.applied_at)),
            "rating" => Some(SortKey::optional(self.rating, SortKey::number)),
            "gpa" => Some(SortKey::optional(self.gpa, SortKey::number)),
            _ => None,
        }
    }
}
