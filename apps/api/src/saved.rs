//! Saved-items provider: per-user bookmarks of jobs and events.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::event::Event;
use crate::models::job::JobPosting;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SavedKind {
    Job,
    Event,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SavedIds {
    pub jobs: Vec<Uuid>,
    pub events: Vec<Uuid>,
}

impl SavedIds {
    pub fn contains(&self, kind: SavedKind, id: Uuid) -> bool {
        match kind {
            SavedKind::Job => self.jobs.contains(&id),
            SavedKind::Event => self.events.contains(&id),
        }
    }

    fn bucket(&mut self, kind: SavedKind) -> &mut Vec<Uuid> {
        match kind {
            SavedKind::Job => &mut self.jobs,
            SavedKind::Event => &mut self.events,
        }
    }
}

/// Bookmarks in the order they were saved.
#[derive(Default)]
pub struct SavedItems {
    by_user: RwLock<HashMap<Uuid, SavedIds>>,
}

impl SavedItems {
    /// Saves `item_id`; saving an already-saved item is a no-op.
    /// Returns whether the item was newly added.
    pub async fn save(&self, user_id: Uuid, kind: SavedKind, item_id: Uuid) -> bool {
        let mut by_user = self.by_user.write().await;
        let bucket = by_user.entry(user_id).or_default().bucket(kind);
        if bucket.contains(&item_id) {
            return false;
        }
        bucket.push(item_id);
        true
    }

    /// Returns whether the item had been saved.
    pub async fn unsave(&self, user_id: Uuid, kind: SavedKind, item_id: Uuid) -> bool {
        let mut by_user = self.by_user.write().await;
        let Some(saved) = by_user.get_mut(&user_id) else {
            return false;
        };
        let bucket = saved.bucket(kind);
        let before = bucket.len();
        bucket.retain(|id| *id != item_id);
        bucket.len() != before
    }

    pub async fn is_saved(&self, user_id: Uuid, kind: SavedKind, item_id: Uuid) -> bool {
        self.by_user
            .read()
            .await
            .get(&user_id)
            .map(|s| s.contains(kind, item_id))
            .unwrap_or(false)
    }

    pub async fn list(&self, user_id: Uuid) -> SavedIds {
        self.by_user
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct SavedItemsResponse {
    pub jobs: Vec<JobPosting>,
    pub events: Vec<Event>,
}

/// GET /api/v1/saved
///
/// Resolves saved ids to records; ids whose record has since been deleted are skipped.
pub async fn handle_list_saved(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Json<SavedItemsResponse> {
    let ids = state.saved.list(caller.user.id).await;

    let mut jobs = Vec::with_capacity(ids.jobs.len());
    for id in ids.jobs {
        if let Some(job) = state.jobs.get(id).await {
            jobs.push(job);
        }
    }
    let mut events = Vec::with_capacity(ids.events.len());
    for id in ids.events {
        if let Some(event) = state.events.get(id).await {
            events.push(event);
        }
    }

    Json(SavedItemsResponse { jobs, events })
}

/// PUT /api/v1/saved/:kind/:id
pub async fn handle_save_item(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((kind, item_id)): Path<(SavedKind, Uuid)>,
) -> Result<StatusCode, AppError> {
    let exists = match kind {
        SavedKind::Job => state.jobs.get(item_id).await.is_some(),
        SavedKind::Event => state.events.get(item_id).await.is_some(),
    };
    if !exists {
        return Err(AppError::NotFound(format!("Item {item_id} not found")));
    }

    state.saved.save(caller.user.id, kind, item_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/saved/:kind/:id
pub async fn handle_unsave_item(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((kind, item_id)): Path<(SavedKind, Uuid)>,
) -> Result<StatusCode, AppError> {
    if !state.saved.unsave(caller.user.id, kind, item_id).await {
        return Err(AppError::NotFound(format!("Item {item_id} is not saved")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let saved = SavedItems::default();
        let user = Uuid::new_v4();
        let job = Uuid::new_v4();

        assert!(saved.save(user, SavedKind::Job, job).await);
        assert!(!saved.save(user, SavedKind::Job, job).await);
        assert_eq!(saved.list(user).await.jobs, vec![job]);
        assert!(saved.is_saved(user, SavedKind::Job, job).await);
        assert!(!saved.is_saved(user, SavedKind::Event, job).await);
    }

    #[tokio::test]
    async fn test_unsave_keeps_order() {
        let saved = SavedItems::default();
        let user = Uuid::new_v4();
        let events: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for id in &events {
            saved.save(user, SavedKind::Event, *id).await;
        }

        assert!(saved.unsave(user, SavedKind::Event, events[1]).await);
        assert!(!saved.unsave(user, SavedKind::Event, events[1]).await);
        assert_eq!(saved.list(user).await.events, vec![events[0], events[2]]);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let saved = SavedItems::default();
        let job = Uuid::new_v4();
        saved.save(Uuid::new_v4(), SavedKind::Job, job).await;
        assert_eq!(saved.list(Uuid::new_v4()).await, SavedIds::default());
    }
}
