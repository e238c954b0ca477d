//! User entity - 用户表
//!
//! 表名: dorm_user

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dorm_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 用户名 (唯一)
    #[sea_orm(column_type = "String(Some(32))", unique)]
    pub username: String,

    /// 密码 (bcrypt 哈希)
    #[sea_orm(column_type = "String(Some(128))")]
    #[serde(skip_serializing, default)]
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::Identified for Model {
    fn id(&self) -> i64 {
        self.id
    }
}
