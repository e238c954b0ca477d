//! Authentication service
//!
//! Principal lookup, registration, password change and role assignment.
//! Nothing here keeps session state; the HTTP layer owns the session.

use std::sync::Arc;

use serde::Serialize;

use super::{require, PasswordHasher};
use crate::dao::{RoleDao, UserDao};
use crate::error::{AppError, AppResult, OptionExt};

/// Authenticated user as seen by the rest of the application
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    /// Role names, e.g. `ROLE_ADMIN`
    pub authorities: Vec<String>,
}

impl Principal {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }
}

pub struct AuthService {
    users: Arc<dyn UserDao>,
    roles: Arc<dyn RoleDao>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserDao>,
        roles: Arc<dyn RoleDao>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
        }
    }

    /// Load a user together with its authorities.
    pub async fn load_by_username(&self, username: &str) -> AppResult<Principal> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))?;
        let authorities = self
            .roles
            .get_by_user(user.id)
            .await?
            .into_iter()
            .map(|r| r.name)
            .collect();

        Ok(Principal {
            user_id: user.id,
            username: user.username,
            password_hash: user.password,
            authorities,
        })
    }

    /// Check credentials; unknown users and wrong passwords look the same.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Principal> {
        let principal = match self.load_by_username(username).await {
            Ok(principal) => principal,
            Err(AppError::UserNotFound(_)) => {
                tracing::warn!("Login failed: user not found - {}", username);
                return Err(AppError::Unauthorized);
            }
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(password, &principal.password_hash) {
            tracing::warn!("Login failed: wrong password - {}", username);
            return Err(AppError::Unauthorized);
        }

        Ok(principal)
    }

    /// Create an account; returns the number of users inserted.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<u64> {
        require(username, "username")?;
        require(password, "password")?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::DuplicateUser(username.to_string()));
        }

        let hash = self.hasher.hash(password)?;
        let inserted = self.users.save(username, &hash).await?;
        tracing::info!("Registered user {}", username);
        Ok(inserted)
    }

    /// Change a password after checking the old one.
    ///
    /// A wrong old password yields `Ok(false)` and leaves the hash untouched.
    pub async fn update_password(&self, old: &str, new: &str, user_id: i64) -> AppResult<bool> {
        require(new, "new password")?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_not_found(format!("user {}", user_id))?;

        if !self.hasher.verify(old, &user.password) {
            tracing::warn!("Password change rejected for {}: old password mismatch", user.username);
            return Ok(false);
        }

        let hash = self.hasher.hash(new)?;
        Ok(self.users.update_password(user_id, &hash).await? == 1)
    }

    /// Replace the user's roles with exactly `role_ids`.
    pub async fn update_roles(&self, user_id: i64, role_ids: &[i64]) -> AppResult<bool> {
        let inserted = self.roles.replace_for_user(user_id, role_ids).await?;
        Ok(inserted as usize == role_ids.len())
    }
}
