use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::admin::{platform_stats, review, ModerationDecision, PlatformStats};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::listing::{self, ListQuery, Page};
use crate::models::moderation::{ContentItem, ModerationStatus};
use crate::models::user::{Role, User, UserStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserStatusChange {
    pub status: UserStatus,
}

/// GET /api/v1/admin/users
pub async fn handle_list_users(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<User>>, AppError> {
    caller.require(Role::Admin)?;
    let query = ListQuery::from_params(&params, &state.config);
    Ok(Json(listing::apply(state.users.list().await, &query)))
}

/// PATCH /api/v1/admin/users/:id/status
///
/// Suspending a user also ends their sessions.
pub async fn handle_set_user_status(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(change): Json<UserStatusChange>,
) -> Result<Json<User>, AppError> {
    caller.require(Role::Admin)?;
    if user_id == caller.user.id && change.status == UserStatus::Suspended {
        return Err(AppError::Validation(
            "admins cannot suspend themselves".to_string(),
        ));
    }

    let status = change.status;
    let user = state
        .users
        .modify(user_id, &move |u: &mut User| u.status = status)
        .await
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    if status == UserStatus::Suspended {
        state.sessions.revoke_user(user_id).await;
        warn!("User {user_id} suspended by {}", caller.user.id);
    } else {
        info!("User {user_id} reactivated by {}", caller.user.id);
    }
    Ok(Json(user))
}

/// DELETE /api/v1/admin/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    caller.require(Role::Admin)?;
    if user_id == caller.user.id {
        return Err(AppError::Validation(
            "admins cannot delete themselves".to_string(),
        ));
    }

    state
        .users
        .remove(user_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    state.sessions.revoke_user(user_id).await;
    warn!("User {user_id} deleted by {}", caller.user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/moderation
///
/// Shows the pending queue unless a `status` filter is given (`all` for everything).
pub async fn handle_list_moderation(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<ContentItem>>, AppError> {
    caller.require(Role::Admin)?;
    let query = ListQuery::from_params(&params, &state.config)
        .with_default_filter("status", ModerationStatus::Pending.as_str());
    Ok(Json(listing::apply(state.content.list().await, &query)))
}

/// POST /api/v1/admin/moderation/:id/:decision
pub async fn handle_moderate(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((item_id, decision)): Path<(Uuid, ModerationDecision)>,
) -> Result<Json<ContentItem>, AppError> {
    caller.require(Role::Admin)?;
    let reviewer = caller.user.id;
    let item = state
        .content
        .modify(item_id, &move |c: &mut ContentItem| {
            review(c, decision, reviewer)
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("Content item {item_id} not found")))?;
    info!(
        "Content {item_id} marked {} by {reviewer}",
        item.status.as_str()
    );
    Ok(Json(item))
}

/// GET /api/v1/admin/stats
pub async fn handle_platform_stats(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<Json<PlatformStats>, AppError> {
    caller.require(Role::Admin)?;
    Ok(Json(platform_stats(
        &state.users.list().await,
        &state.jobs.list().await,
        &state.events.list().await,
        &state.content.list().await,
    )))
}
