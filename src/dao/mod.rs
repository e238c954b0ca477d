//! Data access layer
//!
//! One async trait per entity, each backed by a SeaORM implementation.
//! Services depend on the traits so they can be wired with mocks in tests.

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    EntityTrait, IsolationLevel, TransactionTrait,
};

pub mod building;
pub mod dorm;
pub mod role;
pub mod student;
pub mod user;

pub use building::{BuildingDao, SeaOrmBuildingDao};
pub use dorm::{DormDao, SeaOrmDormDao};
pub use role::{RoleDao, SeaOrmRoleDao};
pub use student::{SeaOrmStudentDao, StudentDao};
pub use user::{SeaOrmUserDao, UserDao};

/// Outcome of a write that has to respect a dorm's capacity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allocation {
    /// The write went through; carries the affected row count
    Applied(u64),
    /// The dorm has no room left
    DormFull { dorm_id: i64, max_num: i32 },
    /// The referenced dorm does not exist
    DormMissing(i64),
}

/// Start a transaction for check-then-write sequences.
///
/// Postgres gets SERIALIZABLE; SQLite transactions already are.
pub(crate) async fn begin_serializable(
    db: &DatabaseConnection,
) -> Result<DatabaseTransaction, DbErr> {
    let isolation = match db.get_database_backend() {
        DbBackend::Sqlite => None,
        _ => Some(IsolationLevel::Serializable),
    };
    db.begin_with_config(isolation, None).await
}

/// Trimmed, non-empty name filter; `None` matches everything.
pub(crate) fn name_filter(name: &str) -> Option<&str> {
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

/// Case-insensitive substring match of `column` against `name`.
///
/// `%`, `_` and `\` in `name` match literally.
pub(crate) fn name_matches<E: EntityTrait>(column: E::Column, name: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((E::default(), column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_filter() {
        assert_eq!(name_filter(""), None);
        assert_eq!(name_filter("   "), None);
        assert_eq!(name_filter(" 101 "), Some("101"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("101"), "101");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
    }
}
