//! Building service

use std::sync::Arc;

use super::{require, ResponsePage};
use crate::dao::BuildingDao;
use crate::entity::building::{self, BuildingType, NewBuilding};
use crate::entity::{ids_of, Identified};
use crate::error::{AppError, AppResult};

pub struct BuildingService {
    dao: Arc<dyn BuildingDao>,
}

impl BuildingService {
    pub fn new(dao: Arc<dyn BuildingDao>) -> Self {
        Self { dao }
    }

    pub async fn get_all(&self) -> AppResult<Vec<building::Model>> {
        self.dao.get_all().await
    }

    pub async fn get_page(
        &self,
        page: i64,
        size: i64,
        name: Option<&str>,
    ) -> AppResult<ResponsePage<building::Model>> {
        let matches = self.dao.get_by_name(name.unwrap_or_default()).await?;
        Ok(ResponsePage::from_full(matches, page, size))
    }

    pub async fn save(&self, building: NewBuilding) -> AppResult<u64> {
        validate(&building.name, building.building_type)?;
        self.dao.save(building).await
    }

    pub async fn edit(&self, building: building::Model) -> AppResult<u64> {
        validate(&building.name, building.building_type)?;
        self.dao.edit(building).await
    }

    pub async fn delete_batch<E: Identified>(&self, buildings: &[E]) -> AppResult<u64> {
        let ids = ids_of(buildings);
        let removed = self.dao.delete_batch(&ids).await?;
        tracing::info!("Deleted {} of {} buildings", removed, ids.len());
        Ok(removed)
    }
}

fn validate(name: &str, building_type: i32) -> AppResult<()> {
    require(name, "building name")?;
    BuildingType::try_from(building_type)
        .map_err(|code| AppError::Validation(format!("unknown building type {}", code)))?;
    Ok(())
}
