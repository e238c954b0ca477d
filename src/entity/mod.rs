//! Entity module - SeaORM 实体定义
//!
//! 包含所有数据库表对应的实体模型

use serde::{Deserialize, Serialize};

pub mod building;
pub mod dorm;
pub mod role;
pub mod student;
pub mod user;
pub mod user_role;

/// Anything that carries a row id; batch deletes only need the id.
pub trait Identified {
    fn id(&self) -> i64;
}

/// Minimal row reference accepted by batch delete endpoints.
///
/// The front end posts whole rows; everything but `id` is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

impl Identified for EntityRef {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Collect the ids of a batch, preserving order.
pub fn ids_of<E: Identified>(items: &[E]) -> Vec<i64> {
    items.iter().map(Identified::id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_ignores_other_fields() {
        let refs: Vec<EntityRef> =
            serde_json::from_str(r#"[{"id":3,"name":"101","maxNum":4},{"id":5}]"#).unwrap();
        assert_eq!(ids_of(&refs), vec![3, 5]);
    }
}
