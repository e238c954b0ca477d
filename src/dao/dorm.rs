//! Dorm data access

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::student::count_occupants;
use super::{begin_serializable, name_filter, name_matches, Allocation};
use crate::entity::building;
use crate::entity::dorm::{self, DormView, NewDorm};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DormDao: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<dorm::Model>>;

    /// Dorms whose name contains `name`, joined with their building.
    async fn get_by_name(&self, name: &str) -> AppResult<Vec<DormView>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<dorm::Model>>;

    async fn count_occupants(&self, dorm_id: i64) -> AppResult<u64>;

    async fn save(&self, dorm: NewDorm) -> AppResult<u64>;

    /// Update a dorm unless its current occupants no longer fit `max_num`.
    async fn edit(&self, dorm: dorm::Model) -> AppResult<Allocation>;

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct SeaOrmDormDao {
    db: DatabaseConnection,
}

impl SeaOrmDormDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DormDao for SeaOrmDormDao {
    async fn get_all(&self) -> AppResult<Vec<dorm::Model>> {
        Ok(dorm::Entity::find()
            .order_by_asc(dorm::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Vec<DormView>> {
        let mut query = dorm::Entity::find().find_also_related(building::Entity);
        if let Some(name) = name_filter(name) {
            query = query.filter(name_matches::<dorm::Entity>(
                dorm::Column::Name,
                name,
            ));
        }
        let rows = query
            .order_by_asc(dorm::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(DormView::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<dorm::Model>> {
        Ok(dorm::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn count_occupants(&self, dorm_id: i64) -> AppResult<u64> {
        Ok(count_occupants(&self.db, dorm_id, None).await?)
    }

    async fn save(&self, dorm: NewDorm) -> AppResult<u64> {
        let model = dorm::ActiveModel {
            name: Set(dorm.name),
            building_id: Set(dorm.building_id),
            max_num: Set(dorm.max_num),
            remark: Set(dorm.remark),
            ..Default::default()
        };
        Ok(dorm::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await?)
    }

    async fn edit(&self, dorm: dorm::Model) -> AppResult<Allocation> {
        let txn = begin_serializable(&self.db).await?;

        let occupants = count_occupants(&txn, dorm.id, None).await?;
        if !dorm.fits(occupants) {
            txn.rollback().await?;
            return Ok(Allocation::DormFull {
                dorm_id: dorm.id,
                max_num: dorm.max_num,
            });
        }

        let result = dorm::Entity::update_many()
            .col_expr(dorm::Column::Name, Expr::value(dorm.name))
            .col_expr(dorm::Column::BuildingId, Expr::value(dorm.building_id))
            .col_expr(dorm::Column::MaxNum, Expr::value(dorm.max_num))
            .col_expr(dorm::Column::Remark, Expr::value(dorm.remark))
            .filter(dorm::Column::Id.eq(dorm.id))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        Ok(Allocation::Applied(result.rows_affected))
    }

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = dorm::Entity::delete_many()
            .filter(dorm::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
