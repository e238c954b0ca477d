//! Student entity - 学生表
//!
//! 表名: dorm_student

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 性别
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male = 1,
    Female = 2,
}

impl TryFrom<i32> for Sex {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sex::Male),
            2 => Ok(Sex::Female),
            other => Err(other),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dorm_student")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 学号 (唯一)
    #[sea_orm(column_type = "String(Some(32))", unique)]
    pub student_no: String,

    /// 姓名
    #[sea_orm(column_type = "String(Some(64))")]
    pub student_name: String,

    /// 性别: 1=男, 2=女
    pub sex: i32,

    /// 所在宿舍 (未分配时为空)
    #[sea_orm(nullable)]
    pub dorm_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dorm::Entity",
        from = "Column::DormId",
        to = "super::dorm::Column::Id",
        on_delete = "SetNull"
    )]
    Dorm,
}

impl Related<super::dorm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dorm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::Identified for Model {
    fn id(&self) -> i64 {
        self.id
    }
}

/// 学生登记请求
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub student_no: String,
    pub student_name: String,
    pub sex: i32,
    #[serde(default)]
    pub dorm_id: Option<i64>,
}

/// 学生列表项 (附带宿舍号)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Model,
    pub dorm_name: Option<String>,
}

impl From<(Model, Option<super::dorm::Model>)> for StudentView {
    fn from((student, dorm): (Model, Option<super::dorm::Model>)) -> Self {
        Self {
            student,
            dorm_name: dorm.map(|d| d.name),
        }
    }
}
