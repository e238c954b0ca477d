//! Dorm entity - 宿舍表
//!
//! 表名: dorm_room

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dorm_room")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 宿舍号
    #[sea_orm(column_type = "String(Some(32))")]
    pub name: String,

    /// 所属宿舍楼
    pub building_id: i64,

    /// 最大容纳人数
    pub max_num: i32,

    /// 备注
    #[sea_orm(column_type = "String(Some(255))", nullable)]
    pub remark: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::building::Entity",
        from = "Column::BuildingId",
        to = "super::building::Column::Id",
        on_delete = "Restrict"
    )]
    Building,
    #[sea_orm(has_many = "super::student::Entity")]
    Student,
}

impl Related<super::building::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Building.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether one more student can move in given the current head count.
    pub fn has_vacancy(&self, occupants: u64) -> bool {
        occupants < self.capacity()
    }

    /// Whether the current head count fits within `max_num`.
    pub fn fits(&self, occupants: u64) -> bool {
        occupants <= self.capacity()
    }

    fn capacity(&self) -> u64 {
        u64::try_from(self.max_num).unwrap_or(0)
    }
}

impl super::Identified for Model {
    fn id(&self) -> i64 {
        self.id
    }
}

/// 新建宿舍请求
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDorm {
    pub name: String,
    pub building_id: i64,
    pub max_num: i32,
    #[serde(default)]
    pub remark: Option<String>,
}

/// 宿舍列表项 (附带宿舍楼名称)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DormView {
    #[serde(flatten)]
    pub dorm: Model,
    pub building_name: Option<String>,
}

impl From<(Model, Option<super::building::Model>)> for DormView {
    fn from((dorm, building): (Model, Option<super::building::Model>)) -> Self {
        Self {
            dorm,
            building_name: building.map(|b| b.name),
        }
    }
}
