use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, RoleProfile, User, UserStatus, UserSummary};
use crate::store::Repository;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub user: UserSummary,
}

/// Authentication state: bearer token → user id.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Uuid>>,
}

impl SessionStore {
    pub async fn login(
        &self,
        users: &dyn Repository<User>,
        request: &LoginRequest,
    ) -> Result<SessionResponse, AppError> {
        let email = request.email.trim().to_lowercase();
        let user = users
            .find(&|u: &User| u.email.to_lowercase() == email)
            .await
            .into_iter()
            .next()
            .filter(|u| u.password == request.password)
            .ok_or(AppError::Unauthorized)?;

        if user.status == UserStatus::Suspended {
            return Err(AppError::Forbidden);
        }

        let now = Utc::now();
        let user = users
            .modify(user.id, &move |u: &mut User| u.last_login = Some(now))
            .await
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;

        let token = self.open(user.id).await;
        info!("User {} logged in as {}", user.id, user.role().as_str());
        Ok(SessionResponse {
            token,
            user: UserSummary::from(&user),
        })
    }

    pub async fn register(
        &self,
        users: &dyn Repository<User>,
        request: RegisterRequest,
    ) -> Result<SessionResponse, AppError> {
        let name = request.name.trim().to_string();
        let email = request.email.trim().to_lowercase();

        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        if !email.contains('@') {
            return Err(AppError::Validation(format!("'{email}' is not a valid email")));
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let now = Utc::now();
        let taken = email.clone();
        let user = users
            .insert_unless(
                User {
                    id: Uuid::new_v4(),
                    name,
                    email,
                    password: request.password,
                    status: UserStatus::Active,
                    avatar_url: None,
                    phone: None,
                    bio: None,
                    profile: RoleProfile::empty(request.role),
                    created_at: now,
                    last_login: Some(now),
                },
                &|u: &User| u.email.to_lowercase() == taken,
            )
            .await
            .ok_or_else(|| AppError::Conflict(format!("{taken} is already registered")))?;

        let token = self.open(user.id).await;
        info!("Registered user {} as {}", user.id, user.role().as_str());
        Ok(SessionResponse {
            token,
            user: UserSummary::from(&user),
        })
    }

    /// Ends the session; returns whether the token was live.
    pub async fn logout(&self, token: Uuid) -> bool {
        self.sessions.write().await.remove(&token).is_some()
    }

    /// Resolves a token to its user. Sessions of deleted or suspended users
    /// are treated as logged out.
    pub async fn current_user(&self, users: &dyn Repository<User>, token: Uuid) -> Option<User> {
        let user_id = *self.sessions.read().await.get(&token)?;
        users
            .get(user_id)
            .await
            .filter(|u| u.status == UserStatus::Active)
    }

    /// Drops every session belonging to `user_id`.
    pub async fn revoke_user(&self, user_id: Uuid) {
        self.sessions.write().await.retain(|_, uid| *uid != user_id);
    }

    async fn open(&self, user_id: Uuid) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.write().await.insert(token, user_id);
        token
    }
}
