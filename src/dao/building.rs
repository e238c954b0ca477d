//! Building data access

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{name_filter, name_matches};
use crate::entity::building::{self, NewBuilding};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildingDao: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<building::Model>>;

    /// Buildings whose name contains `name`; empty matches all.
    async fn get_by_name(&self, name: &str) -> AppResult<Vec<building::Model>>;

    async fn save(&self, building: NewBuilding) -> AppResult<u64>;

    async fn edit(&self, building: building::Model) -> AppResult<u64>;

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct SeaOrmBuildingDao {
    db: DatabaseConnection,
}

impl SeaOrmBuildingDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BuildingDao for SeaOrmBuildingDao {
    async fn get_all(&self) -> AppResult<Vec<building::Model>> {
        Ok(building::Entity::find()
            .order_by_asc(building::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Vec<building::Model>> {
        let mut query = building::Entity::find();
        if let Some(name) = name_filter(name) {
            query = query.filter(name_matches::<building::Entity>(
                building::Column::Name,
                name,
            ));
        }
        Ok(query
            .order_by_asc(building::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn save(&self, building: NewBuilding) -> AppResult<u64> {
        let model = building::ActiveModel {
            name: Set(building.name),
            building_type: Set(building.building_type),
            remark: Set(building.remark),
            ..Default::default()
        };
        Ok(building::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await?)
    }

    async fn edit(&self, building: building::Model) -> AppResult<u64> {
        let result = building::Entity::update_many()
            .col_expr(building::Column::Name, Expr::value(building.name))
            .col_expr(building::Column::BuildingType, Expr::value(building.building_type))
            .col_expr(building::Column::Remark, Expr::value(building.remark))
            .filter(building::Column::Id.eq(building.id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = building::Entity::delete_many()
            .filter(building::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
