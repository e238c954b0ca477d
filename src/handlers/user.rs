//! User handlers
//!
//! Renaming, deleting and role assignment are admin-only; any signed-in
//! user may change their own password.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::PageQuery;
use crate::entity::{user, EntityRef};
use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::routes::ApiResponse;
use crate::service::ResponsePage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditUserRequest {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolesRequest {
    pub user_id: i64,
    pub role_ids: Vec<i64>,
}

/// GET /api/user/all
pub async fn get_all(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<user::Model>>>> {
    Ok(Json(ApiResponse::success(state.users.get_all().await?)))
}

/// GET /api/user/page
pub async fn get_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<ResponsePage<user::Model>>>> {
    let page = state
        .users
        .get_page(query.page, query.size, query.name.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/user/edit
pub async fn edit(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<EditUserRequest>,
) -> AppResult<Json<ApiResponse<u64>>> {
    current_user.require_admin()?;
    Ok(Json(ApiResponse::success(
        state.users.edit(req.id, &req.username).await?,
    )))
}

/// POST /api/user/delete
pub async fn delete_batch(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<Vec<EntityRef>>,
) -> AppResult<Json<ApiResponse<u64>>> {
    current_user.require_admin()?;
    Ok(Json(ApiResponse::success(state.users.delete_batch(&req).await?)))
}

/// POST /api/user/password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let updated = state
        .auth
        .update_password(&req.old_password, &req.new_password, current_user.id)
        .await?;
    if updated {
        tracing::info!("Password changed for {}", current_user.username);
        Ok(Json(ApiResponse::success_msg("password updated")))
    } else {
        Ok(Json(ApiResponse::fail("old password is incorrect")))
    }
}

/// POST /api/user/roles
pub async fn update_roles(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<UpdateRolesRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    current_user.require_admin()?;
    if state.auth.update_roles(req.user_id, &req.role_ids).await? {
        Ok(Json(ApiResponse::success_msg("roles updated")))
    } else {
        Ok(Json(ApiResponse::fail("roles were not updated")))
    }
}
