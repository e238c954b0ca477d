//! Building entity - 宿舍楼表
//!
//! 表名: dorm_building

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 宿舍楼类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingType {
    /// 男生楼
    Male = 1,
    /// 女生楼
    Female = 2,
    /// 其他
    Other = 3,
}

impl TryFrom<i32> for BuildingType {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BuildingType::Male),
            2 => Ok(BuildingType::Female),
            3 => Ok(BuildingType::Other),
            other => Err(other),
        }
    }
}

impl From<BuildingType> for i32 {
    fn from(kind: BuildingType) -> Self {
        kind as i32
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dorm_building")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 楼名
    #[sea_orm(column_type = "String(Some(64))")]
    pub name: String,

    /// 类型: 1=男, 2=女, 3=其他
    pub building_type: i32,

    /// 备注
    #[sea_orm(column_type = "String(Some(255))", nullable)]
    pub remark: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dorm::Entity")]
    Dorm,
}

impl Related<super::dorm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dorm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 新建宿舍楼请求
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBuilding {
    pub name: String,
    pub building_type: i32,
    #[serde(default)]
    pub remark: Option<String>,
}

impl super::Identified for Model {
    fn id(&self) -> i64 {
        self.id
    }
}
