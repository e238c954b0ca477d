//! Role entity - 角色表
//!
//! 表名: dorm_role

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 管理员角色
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
/// 普通用户角色, 注册时默认授予
pub const ROLE_USER: &str = "ROLE_USER";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dorm_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 权限标识, 如 ROLE_ADMIN
    #[sea_orm(column_type = "String(Some(32))", unique)]
    pub name: String,
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

impl ActiveModelBehavior for ActiveModel {}
