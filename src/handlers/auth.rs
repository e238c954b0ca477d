//! Authentication handlers
//!
//! Implements login, logout, registration and current user endpoints

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{CurrentUser, SESSION_TIMESTAMP_KEY, SESSION_USER_KEY};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Login / register request body
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<Credentials>,
) -> AppResult<Json<ApiResponse<CurrentUser>>> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("username and password are required".to_string()));
    }

    let principal = state.auth.authenticate(&req.username, &req.password).await?;

    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, &principal.username).await?;
    session
        .insert(SESSION_TIMESTAMP_KEY, chrono::Utc::now().timestamp())
        .await?;

    tracing::info!("User logged in: {}", principal.username);
    Ok(Json(ApiResponse::success(CurrentUser::from(principal))))
}

/// POST /api/logout
pub async fn logout(
    session: Session,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<()>>> {
    session.flush().await?;
    tracing::info!("User logged out: {}", current_user.username);
    Ok(Json(ApiResponse::success_msg("logout success")))
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> AppResult<Json<ApiResponse<u64>>> {
    let inserted = state.auth.register(&req.username, &req.password).await?;
    Ok(Json(ApiResponse::success(inserted)))
}

/// GET /api/user/current
pub async fn current_user(
    Extension(user): Extension<CurrentUser>,
) -> Json<ApiResponse<CurrentUser>> {
    Json(ApiResponse::success(user))
}
