//! Candidate multi-select and the bulk status action built on it.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::store::Repository;

/// Selected candidate ids per user, in selection order.
#[derive(Default)]
pub struct CandidateSelections {
    by_user: RwLock<HashMap<Uuid, Vec<Uuid>>>,
}

impl CandidateSelections {
    pub async fn get(&self, user_id: Uuid) -> Vec<Uuid> {
        self.by_user
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Adds `candidate_id` if absent, removes it if present.
    pub async fn toggle(&self, user_id: Uuid, candidate_id: Uuid) -> Vec<Uuid> {
        let mut by_user = self.by_user.write().await;
        let selected = by_user.entry(user_id).or_default();
        match selected.iter().position(|id| *id == candidate_id) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(candidate_id),
        }
        selected.clone()
    }

    /// Replaces the selection with `ids` (deduplicated, order kept).
    pub async fn replace(&self, user_id: Uuid, ids: Vec<Uuid>) -> Vec<Uuid> {
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        self.by_user.write().await.insert(user_id, unique.clone());
        unique
    }

    /// Drops `ids` from the selection, leaving anything else selected.
    pub async fn deselect(&self, user_id: Uuid, ids: &[Uuid]) -> Vec<Uuid> {
        let mut by_user = self.by_user.write().await;
        let Some(selected) = by_user.get_mut(&user_id) else {
            return Vec::new();
        };
        selected.retain(|id| !ids.contains(id));
        let remaining = selected.clone();
        if remaining.is_empty() {
            by_user.remove(&user_id);
        }
        remaining
    }

    pub async fn clear(&self, user_id: Uuid) {
        self.by_user.write().await.remove(&user_id);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdateResult {
    pub status: CandidateStatus,
    pub requested: usize,
    pub updated: usize,
    /// The selection after the action: only ids picked while it was in flight.
    pub selection: Vec<Uuid>,
}

/// Applies `status` to every selected candidate, then deselects them.
///
/// `latency` stands in for a backend round-trip before the write lands.
pub async fn bulk_update_status(
    candidates: &dyn Repository<Candidate>,
    selections: &CandidateSelections,
    user_id: Uuid,
    status: CandidateStatus,
    latency: Duration,
) -> Result<BulkUpdateResult, AppError> {
    let selected = selections.get(user_id).await;
    if selected.is_empty() {
        return Err(AppError::Validation("no candidates selected".to_string()));
    }

    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let updated = candidates
        .modify_many(&selected, &move |c: &mut Candidate| c.status = status)
        .await;
    let remaining = selections.deselect(user_id, &selected).await;

    info!(
        "Bulk status update to {} by {user_id}: {updated}/{} candidates",
        status.as_str(),
        selected.len()
    );

    Ok(BulkUpdateResult {
        status,
        requested: selected.len(),
        updated,
        selection: remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::SeedData;
    use crate::store::InMemoryRepository;

    #[tokio::test]
    async fn test_toggle_adds_and_removes() {
        let selections = CandidateSelections::default();
        let user = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        selections.toggle(user, a).await;
        assert_eq!(selections.toggle(user, b).await, vec![a, b]);
        assert_eq!(selections.toggle(user, a).await, vec![b]);
    }

    #[tokio::test]
    async fn test_replace_dedups() {
        let selections = CandidateSelections::default();
        let user = Uuid::new_v4();
        let a = Uuid::new_v4();
        assert_eq!(selections.replace(user, vec![a, a]).await, vec![a]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bulk_update_applies_to_exactly_selected_and_clears() {
        let seed = SeedData::mock().candidates;
        let repo = InMemoryRepository::new(seed.clone());
        let selections = CandidateSelections::default();
        let user = Uuid::new_v4();

        let chosen = vec![seed[1].id, seed[2].id, seed[4].id];
        selections.replace(user, chosen.clone()).await;

        let result = bulk_update_status(
            &repo,
            &selections,
            user,
            CandidateStatus::Interview,
            Duration::from_millis(1000),
        )
        .await
        .unwrap();

        assert_eq!(result.requested, 3);
        assert_eq!(result.updated, 3);
        assert!(result.selection.is_empty());
        assert!(selections.get(user).await.is_empty());

        for candidate in repo.list().await {
            let original = seed.iter().find(|c| c.id == candidate.id).unwrap();
            if chosen.contains(&candidate.id) {
                assert_eq!(candidate.status, CandidateStatus::Interview);
            } else {
                assert_eq!(candidate.status, original.status);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_made_during_bulk_update_survives() {
        let seed = SeedData::mock().candidates;
        let repo = InMemoryRepository::new(seed.clone());
        let selections = CandidateSelections::default();
        let user = Uuid::new_v4();
        selections.replace(user, vec![seed[0].id]).await;

        let late_pick = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            selections.toggle(user, seed[3].id).await
        };
        let (result, _) = tokio::join!(
            bulk_update_status(
                &repo,
                &selections,
                user,
                CandidateStatus::Offer,
                Duration::from_millis(1000),
            ),
            late_pick
        );
        let result = result.unwrap();

        assert_eq!(result.updated, 1);
        assert_eq!(result.selection, vec![seed[3].id]);
        assert_eq!(selections.get(user).await, vec![seed[3].id]);
        let untouched = repo.get(seed[3].id).await.unwrap();
        assert_eq!(untouched.status, seed[3].status);
    }

    #[tokio::test]
    async fn test_bulk_update_requires_selection() {
        let repo = InMemoryRepository::new(SeedData::mock().candidates);
        let err = bulk_update_status(
            &repo,
            &CandidateSelections::default(),
            Uuid::new_v4(),
            CandidateStatus::Rejected,
            Duration::ZERO,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
