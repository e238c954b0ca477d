use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::handlers;
use crate::middleware::auth_layer;
use crate::state::AppState;

pub mod health;

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            code: true,
            message: message.into(),
            data: None,
        }
    }

    /// A handled refusal that is not an HTTP error
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/register", post(handlers::auth::register))
        .route("/user/current", get(handlers::auth::current_user))
        // Building routes
        .route("/building/all", get(handlers::building::get_all))
        .route("/building/page", get(handlers::building::get_page))
        .route("/building/save", post(handlers::building::save))
        .route("/building/edit", post(handlers::building::edit))
        .route("/building/delete", post(handlers::building::delete_batch))
        // Dorm routes
        .route("/dorm/all", get(handlers::dorm::get_all))
        .route("/dorm/page", get(handlers::dorm::get_page))
        .route("/dorm/save", post(handlers::dorm::save))
        .route("/dorm/edit", post(handlers::dorm::edit))
        .route("/dorm/delete", post(handlers::dorm::delete_batch))
        .route("/dorm/occupancy", get(handlers::dorm::occupancy))
        // Student routes
        .route("/student/all", get(handlers::student::get_all))
        .route("/student/page", get(handlers::student::get_page))
        .route("/student/by-dorm", get(handlers::student::get_by_dorm))
        .route("/student/save", post(handlers::student::save))
        .route("/student/edit", post(handlers::student::edit))
        .route("/student/delete", post(handlers::student::delete_batch))
        // User routes
        .route("/user/all", get(handlers::user::get_all))
        .route("/user/page", get(handlers::user::get_page))
        .route("/user/edit", post(handlers::user::edit))
        .route("/user/delete", post(handlers::user::delete_batch))
        .route("/user/password", post(handlers::user::change_password))
        .route("/user/roles", post(handlers::user::update_roles))
        // Role routes
        .route("/role/all", get(handlers::role::get_all))
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // Session store (in-memory for now)
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Built front end, falling back to index.html for client-side routing
    let static_dir = &state.config.static_dir;
    let serve_dir =
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes())
        .fallback_service(serve_dir)
        .layer(middleware::from_fn_with_state(state.clone(), auth_layer))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_shape() {
        let json = serde_json::to_value(ApiResponse::success(3u64)).unwrap();
        assert_eq!(json, serde_json::json!({"code": true, "message": "success", "data": 3}));

        let json = serde_json::to_value(ApiResponse::fail("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"code": false, "message": "nope"}));
    }
}
