//! Role handlers

use axum::{extract::State, Json};

use crate::entity::role;
use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::state::AppState;

/// GET /api/role/all
pub async fn get_all(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<role::Model>>>> {
    Ok(Json(ApiResponse::success(state.users.roles().await?)))
}
