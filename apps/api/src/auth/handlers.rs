use axum::{extract::State, http::StatusCode, Json};

use crate::auth::session::{LoginRequest, RegisterRequest, SessionResponse};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.login(state.users.as_ref(), &request).await?;
    Ok(Json(session))
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = state.sessions.register(state.users.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> StatusCode {
    state.sessions.logout(caller.token).await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/me
pub async fn handle_me(caller: CurrentUser) -> Json<User> {
    Json(caller.user)
}
