//! Role and user-role data access

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::JoinType;

use crate::entity::{role, user_role};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleDao: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<role::Model>>;

    async fn get_by_user(&self, user_id: i64) -> AppResult<Vec<role::Model>>;

    /// Replace every role of `user_id` with `role_ids`.
    ///
    /// All-or-nothing: when fewer associations than requested are inserted,
    /// or a role id is unknown, the previous role set is kept and the count
    /// returned is short of `role_ids.len()`.
    async fn replace_for_user(&self, user_id: i64, role_ids: &[i64]) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct SeaOrmRoleDao {
    db: DatabaseConnection,
}

impl SeaOrmRoleDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleDao for SeaOrmRoleDao {
    async fn get_all(&self) -> AppResult<Vec<role::Model>> {
        Ok(role::Entity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_by_user(&self, user_id: i64) -> AppResult<Vec<role::Model>> {
        Ok(role::Entity::find()
            .join(JoinType::InnerJoin, role::Relation::UserRole.def())
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn replace_for_user(&self, user_id: i64, role_ids: &[i64]) -> AppResult<u64> {
        let txn = self.db.begin().await?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        if role_ids.is_empty() {
            txn.commit().await?;
            return Ok(0);
        }

        let mut distinct = role_ids.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        let known = role::Entity::find()
            .filter(role::Column::Id.is_in(distinct.iter().copied()))
            .count(&txn)
            .await?;
        if known as usize != distinct.len() {
            tracing::warn!(
                "Role update for user {} names unknown roles {:?}, rolling back",
                user_id,
                role_ids
            );
            txn.rollback().await?;
            return Ok(0);
        }

        let rows = role_ids.iter().map(|&role_id| user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
        });
        let inserted = user_role::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::RoleId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        if inserted as usize == role_ids.len() {
            txn.commit().await?;
        } else {
            tracing::warn!(
                "Role update for user {} inserted {} of {} roles, rolling back",
                user_id,
                inserted,
                role_ids.len()
            );
            txn.rollback().await?;
        }

        Ok(inserted)
    }
}
