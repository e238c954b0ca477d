//! Building handlers

use axum::{
    extract::{Query, State},
    Json,
};

use super::PageQuery;
use crate::entity::building::{self, NewBuilding};
use crate::entity::EntityRef;
use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::service::ResponsePage;
use crate::state::AppState;

/// GET /api/building/all
pub async fn get_all(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<building::Model>>>> {
    Ok(Json(ApiResponse::success(state.buildings.get_all().await?)))
}

/// GET /api/building/page
pub async fn get_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<ResponsePage<building::Model>>>> {
    let page = state
        .buildings
        .get_page(query.page, query.size, query.name.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/building/save
pub async fn save(
    State(state): State<AppState>,
    Json(req): Json<NewBuilding>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.buildings.save(req).await?)))
}

/// POST /api/building/edit
pub async fn edit(
    State(state): State<AppState>,
    Json(req): Json<building::Model>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.buildings.edit(req).await?)))
}

/// POST /api/building/delete
pub async fn delete_batch(
    State(state): State<AppState>,
    Json(req): Json<Vec<EntityRef>>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.buildings.delete_batch(&req).await?)))
}
