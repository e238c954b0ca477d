//! User service
//!
//! Listing and maintenance of accounts. Registration, password changes and
//! role assignment live in [`super::AuthService`].

use std::sync::Arc;

use super::{require, ResponsePage};
use crate::dao::{RoleDao, UserDao};
use crate::entity::{ids_of, role, user, Identified};
use crate::error::{AppError, AppResult};

pub struct UserService {
    users: Arc<dyn UserDao>,
    roles: Arc<dyn RoleDao>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserDao>, roles: Arc<dyn RoleDao>) -> Self {
        Self { users, roles }
    }

    pub async fn get_all(&self) -> AppResult<Vec<user::Model>> {
        self.users.get_all().await
    }

    pub async fn get_page(
        &self,
        page: i64,
        size: i64,
        username: Option<&str>,
    ) -> AppResult<ResponsePage<user::Model>> {
        let matches = self.users.get_by_name(username.unwrap_or_default()).await?;
        Ok(ResponsePage::from_full(matches, page, size))
    }

    /// Rename a user; the new name must not belong to someone else.
    pub async fn edit(&self, id: i64, username: &str) -> AppResult<u64> {
        require(username, "username")?;
        if let Some(existing) = self.users.find_by_username(username).await? {
            if existing.id != id {
                return Err(AppError::DuplicateUser(username.to_string()));
            }
        }
        self.users.edit(id, username).await
    }

    pub async fn delete_batch<E: Identified>(&self, users: &[E]) -> AppResult<u64> {
        let ids = ids_of(users);
        let removed = self.users.delete_batch(&ids).await?;
        tracing::info!("Deleted {} of {} users", removed, ids.len());
        Ok(removed)
    }

    pub async fn roles(&self) -> AppResult<Vec<role::Model>> {
        self.roles.get_all().await
    }
}
