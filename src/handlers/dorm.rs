//! Dorm handlers

use axum::{
    extract::{Query, State},
    Json,
};

use super::{IdQuery, PageQuery};
use crate::entity::dorm::{self, DormView, NewDorm};
use crate::entity::EntityRef;
use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::service::{Occupancy, ResponsePage};
use crate::state::AppState;

/// GET /api/dorm/all
pub async fn get_all(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<dorm::Model>>>> {
    Ok(Json(ApiResponse::success(state.dorms.get_all().await?)))
}

/// GET /api/dorm/page
pub async fn get_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<ResponsePage<DormView>>>> {
    let page = state
        .dorms
        .get_page(query.page, query.size, query.name.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/dorm/save
pub async fn save(
    State(state): State<AppState>,
    Json(req): Json<NewDorm>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.dorms.save(req).await?)))
}

/// POST /api/dorm/edit
pub async fn edit(
    State(state): State<AppState>,
    Json(req): Json<dorm::Model>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.dorms.edit(req).await?)))
}

/// POST /api/dorm/delete
pub async fn delete_batch(
    State(state): State<AppState>,
    Json(req): Json<Vec<EntityRef>>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.dorms.delete_batch(&req).await?)))
}

/// GET /api/dorm/occupancy?id=
pub async fn occupancy(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<Occupancy>>> {
    Ok(Json(ApiResponse::success(state.dorms.occupancy(query.id).await?)))
}
