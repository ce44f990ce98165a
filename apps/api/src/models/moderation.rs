use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Listable, SortKey};
use crate::store::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    JobPosting,
    Event,
    Profile,
    Review,
    Comment,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::JobPosting => "job_posting",
            ContentKind::Event => "event",
            ContentKind::Profile => "profile",
            ContentKind::Review => "review",
            ContentKind::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
    Flagged,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
            ModerationStatus::Flagged => "flagged",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub kind: ContentKind,
    pub title: String,
    pub author: String,
    pub excerpt: String,
    pub report_reason: Option<String>,
    pub reported_at: DateTime<Utc>,
    pub status: ModerationStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Record for ContentItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for ContentItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.author.as_str(),
            self.excerpt.as_str(),
        ];
        if let Some(reason) = &self.report_reason {
            fields.push(reason.as_str());
        }
        fields
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_string()),
            "kind" => Some(self.kind.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "reported_at" => Some(SortKey::Time(self.reported_at)),
            "title" => Some(SortKey::text(&self.title)),
            "author" => Some(SortKey::text(&self.author)),
            _ => None,
        }
    }
}
