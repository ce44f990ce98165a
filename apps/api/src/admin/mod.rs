// Admin views: user management, the moderation queue and platform stats.

pub mod handlers;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::{Event, EventStatus};
use crate::models::job::{JobPosting, JobStatus};
use crate::models::moderation::{ContentItem, ModerationStatus};
use crate::models::user::{Role, User, UserStatus};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModerationDecision {
    Approve,
    Reject,
    Flag,
}

impl ModerationDecision {
    pub fn status(self) -> ModerationStatus {
        match self {
            ModerationDecision::Approve => ModerationStatus::Approved,
            ModerationDecision::Reject => ModerationStatus::Rejected,
            ModerationDecision::Flag => ModerationStatus::Flagged,
        }
    }
}

/// Records the decision and who made it. Any item may be re-reviewed.
pub fn review(item: &mut ContentItem, decision: ModerationDecision, reviewer: Uuid) {
    item.status = decision.status();
    item.reviewed_by = Some(reviewer);
    item.reviewed_at = Some(Utc::now());
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoleCount {
    pub role: Role,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformStats {
    pub total_users: usize,
    pub users_by_role: Vec<RoleCount>,
    pub suspended_users: usize,
    pub active_jobs: usize,
    pub upcoming_events: usize,
    pub pending_moderation: usize,
}

pub fn platform_stats(
    users: &[User],
    jobs: &[JobPosting],
    events: &[Event],
    content: &[ContentItem],
) -> PlatformStats {
    PlatformStats {
        total_users: users.len(),
        users_by_role: Role::ALL
            .iter()
            .map(|role| RoleCount {
                role: *role,
                count: users.iter().filter(|u| u.role() == *role).count(),
            })
            .collect(),
        suspended_users: users.iter().filter(|u| u.status == UserStatus::Suspended).count(),
        active_jobs: jobs.iter().filter(|j| j.status == JobStatus::Active).count(),
        upcoming_events: events
            .iter()
            .filter(|e| e.status == EventStatus::Upcoming)
            .count(),
        pending_moderation: content
            .iter()
            .filter(|c| c.status == ModerationStatus::Pending)
            .count(),
    }
}
