//! User data access

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{name_filter, name_matches};
use crate::entity::{role, user, user_role};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDao: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<user::Model>>;

    /// Users whose username contains `name`; empty matches all.
    async fn get_by_name(&self, name: &str) -> AppResult<Vec<user::Model>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<user::Model>>;

    /// Insert a user with an already hashed password.
    ///
    /// The default role is granted in the same transaction when it exists.
    async fn save(&self, username: &str, password_hash: &str) -> AppResult<u64>;

    async fn edit(&self, id: i64, username: &str) -> AppResult<u64>;

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<u64>;

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct SeaOrmUserDao {
    db: DatabaseConnection,
}

impl SeaOrmUserDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDao for SeaOrmUserDao {
    async fn get_all(&self) -> AppResult<Vec<user::Model>> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Vec<user::Model>> {
        let mut query = user::Entity::find();
        if let Some(name) = name_filter(name) {
            query = query.filter(name_matches::<user::Entity>(
                user::Column::Username,
                name,
            ));
        }
        Ok(query.order_by_asc(user::Column::Id).all(&self.db).await?)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn save(&self, username: &str, password_hash: &str) -> AppResult<u64> {
        let txn = self.db.begin().await?;

        let created = user::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password_hash.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let default_role = role::Entity::find()
            .filter(role::Column::Name.eq(role::ROLE_USER))
            .one(&txn)
            .await?;
        if let Some(default_role) = default_role {
            user_role::ActiveModel {
                user_id: Set(created.id),
                role_id: Set(default_role.id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(1)
    }

    async fn edit(&self, id: i64, username: &str) -> AppResult<u64> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Username, Expr::value(username))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<u64> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Password, Expr::value(password_hash))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = user::Entity::delete_many()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
