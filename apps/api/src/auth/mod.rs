// Authentication provider: mock credential login, sessions keyed by bearer
// token, and the `CurrentUser` extractor used by per-user endpoints.

pub mod handlers;
pub mod session;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, User};
use crate::state::AppState;

pub use session::SessionStore;

/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
pub struct CurrentUser {
    pub token: Uuid,
    pub user: User,
}

impl CurrentUser {
    /// `Forbidden` unless the caller holds `role`.
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.user.role() == role {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

pub fn bearer_token(parts: &Parts) -> Option<Uuid> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .and_then(|t| Uuid::parse_str(t.trim()).ok())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let user = state
            .sessions
            .current_user(state.users.as_ref(), token)
            .await
            .ok_or(AppError::Unauthorized)?;
        Ok(CurrentUser { token, user })
    }
}

/// Like `CurrentUser`, but anonymous callers are allowed through as `None`.
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };
        let user = state
            .sessions
            .current_user(state.users.as_ref(), token)
            .await;
        Ok(MaybeUser(user))
    }
}
