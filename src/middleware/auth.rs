//! Authentication middleware
//!
//! Provides session-based authentication for API routes

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_sessions::Session;

use crate::entity::role::ROLE_ADMIN;
use crate::error::{AppError, AppResult};
use crate::service::Principal;
use crate::state::AppState;

/// Session key for storing username
pub const SESSION_USER_KEY: &str = "user";
pub const SESSION_TIMESTAMP_KEY: &str = "timestamp";

/// Extension to store current user in request
#[derive(Clone, Debug, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub authorities: Vec<String>,
}

impl CurrentUser {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    pub fn is_admin(&self) -> bool {
        self.has_authority(ROLE_ADMIN)
    }

    /// `Forbidden` unless the user holds `ROLE_ADMIN`
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!("User {} denied: admin required", self.username);
            Err(AppError::Forbidden)
        }
    }
}

impl From<Principal> for CurrentUser {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.user_id,
            username: principal.username,
            authorities: principal.authorities,
        }
    }
}

/// Paths that don't require authentication
pub fn is_public_path(path: &str) -> bool {
    // Everything outside /api is the static front end
    if !path.starts_with("/api") {
        return true;
    }
    matches!(path, "/api/health" | "/api/login" | "/api/register")
}

/// Authentication middleware
pub async fn auth_layer(
    State(state): State<AppState>,
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let username: Option<String> = session.get(SESSION_USER_KEY).await.unwrap_or(None);
    let Some(username) = username else {
        return AppError::Unauthorized.into_response();
    };

    match state.auth.load_by_username(&username).await {
        Ok(principal) => {
            request.extensions_mut().insert(CurrentUser::from(principal));
            next.run(request).await
        }
        Err(AppError::UserNotFound(_)) => {
            // Account deleted while the session was alive
            tracing::warn!("User not found in database: {}", username);
            AppError::Unauthorized.into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/"));
        assert!(is_public_path("/assets/index.js"));
        assert!(is_public_path("/api/health"));
        assert!(is_public_path("/api/login"));
        assert!(is_public_path("/api/register"));
        assert!(!is_public_path("/api/logout"));
        assert!(!is_public_path("/api/building/page"));
        assert!(!is_public_path("/api/user/current"));
    }

    #[test]
    fn test_admin_check() {
        let user = CurrentUser {
            id: 1,
            username: "admin".to_string(),
            authorities: vec!["ROLE_USER".to_string(), ROLE_ADMIN.to_string()],
        };
        assert!(user.is_admin());
        assert!(user.require_admin().is_ok());

        let user = CurrentUser {
            authorities: vec!["ROLE_USER".to_string()],
            ..user
        };
        assert!(matches!(user.require_admin(), Err(AppError::Forbidden)));
    }
}
