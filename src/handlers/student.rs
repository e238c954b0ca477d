//! Student handlers
//!
//! Registration and reallocation go through the dorm capacity check; a full
//! dorm comes back as 409.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::PageQuery;
use crate::entity::student::{self, NewStudent, StudentView};
use crate::entity::EntityRef;
use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::service::ResponsePage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DormQuery {
    pub dorm_id: i64,
}

/// GET /api/student/all
pub async fn get_all(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<student::Model>>>> {
    Ok(Json(ApiResponse::success(state.students.get_all().await?)))
}

/// GET /api/student/page
pub async fn get_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<ResponsePage<StudentView>>>> {
    let page = state
        .students
        .get_page(query.page, query.size, query.name.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/student/by-dorm?dormId=
pub async fn get_by_dorm(
    State(state): State<AppState>,
    Query(query): Query<DormQuery>,
) -> AppResult<Json<ApiResponse<Vec<student::Model>>>> {
    Ok(Json(ApiResponse::success(
        state.students.get_by_dorm(query.dorm_id).await?,
    )))
}

/// POST /api/student/save
pub async fn save(
    State(state): State<AppState>,
    Json(req): Json<NewStudent>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.students.save(req).await?)))
}

/// POST /api/student/edit
pub async fn edit(
    State(state): State<AppState>,
    Json(req): Json<student::Model>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.students.edit(req).await?)))
}

/// POST /api/student/delete
pub async fn delete_batch(
    State(state): State<AppState>,
    Json(req): Json<Vec<EntityRef>>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::success(state.students.delete_batch(&req).await?)))
}
