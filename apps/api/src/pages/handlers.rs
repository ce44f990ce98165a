use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::auth::{CurrentUser, MaybeUser};
use crate::pages::{menu, resolve, PageEntry, Resolution};

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    pub path: String,
}

/// GET /api/v1/navigation?path=/app/jobs
pub async fn handle_resolve(
    MaybeUser(user): MaybeUser,
    Query(query): Query<NavigationQuery>,
) -> Json<Resolution> {
    Json(resolve(&query.path, user.map(|u| u.role())))
}

/// GET /api/v1/navigation/menu
pub async fn handle_menu(caller: CurrentUser) -> Json<Vec<PageEntry>> {
    Json(menu(caller.user.role()))
}
