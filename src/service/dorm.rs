//! Dorm service

use std::sync::Arc;

use serde::Serialize;

use super::{require, settle, ResponsePage};
use crate::dao::DormDao;
use crate::entity::dorm::{self, DormView, NewDorm};
use crate::entity::{ids_of, Identified};
use crate::error::{AppError, AppResult, OptionExt};

/// Current head count of a dorm against its capacity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupancy {
    pub dorm_id: i64,
    pub occupants: u64,
    pub max_num: i32,
    pub vacancies: u64,
}

pub struct DormService {
    dao: Arc<dyn DormDao>,
}

impl DormService {
    pub fn new(dao: Arc<dyn DormDao>) -> Self {
        Self { dao }
    }

    pub async fn get_all(&self) -> AppResult<Vec<dorm::Model>> {
        self.dao.get_all().await
    }

    pub async fn get_page(
        &self,
        page: i64,
        size: i64,
        name: Option<&str>,
    ) -> AppResult<ResponsePage<DormView>> {
        let matches = self.dao.get_by_name(name.unwrap_or_default()).await?;
        Ok(ResponsePage::from_full(matches, page, size))
    }

    pub async fn save(&self, dorm: NewDorm) -> AppResult<u64> {
        validate(&dorm.name, dorm.max_num)?;
        self.dao.save(dorm).await
    }

    /// Update a dorm; shrinking it below its current head count is rejected.
    pub async fn edit(&self, dorm: dorm::Model) -> AppResult<u64> {
        validate(&dorm.name, dorm.max_num)?;
        settle(self.dao.edit(dorm).await?)
    }

    pub async fn delete_batch<E: Identified>(&self, dorms: &[E]) -> AppResult<u64> {
        let ids = ids_of(dorms);
        let removed = self.dao.delete_batch(&ids).await?;
        tracing::info!("Deleted {} of {} dorms", removed, ids.len());
        Ok(removed)
    }

    pub async fn occupancy(&self, dorm_id: i64) -> AppResult<Occupancy> {
        let room = self
            .dao
            .find_by_id(dorm_id)
            .await?
            .ok_or_not_found(format!("dorm {}", dorm_id))?;
        let occupants = self.dao.count_occupants(dorm_id).await?;
        let capacity = u64::try_from(room.max_num).unwrap_or(0);
        Ok(Occupancy {
            dorm_id,
            occupants,
            max_num: room.max_num,
            vacancies: capacity.saturating_sub(occupants),
        })
    }
}

fn validate(name: &str, max_num: i32) -> AppResult<()> {
    require(name, "dorm name")?;
    if max_num <= 0 {
        return Err(AppError::Validation(format!(
            "max_num must be positive, got {}",
            max_num
        )));
    }
    Ok(())
}
