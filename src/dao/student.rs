//! Student data access
//!
//! Writes that place a student into a dorm run the occupancy check and the
//! write inside a single transaction.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::{begin_serializable, name_filter, name_matches, Allocation};
use crate::entity::dorm;
use crate::entity::student::{self, NewStudent, StudentView};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDao: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<student::Model>>;

    /// Students whose name contains `name`, joined with their dorm.
    async fn get_by_name(&self, name: &str) -> AppResult<Vec<StudentView>>;

    async fn get_by_dorm(&self, dorm_id: i64) -> AppResult<Vec<student::Model>>;

    /// Insert a student; with a dorm assigned the dorm must have a vacancy.
    async fn save(&self, student: NewStudent) -> AppResult<Allocation>;

    /// Update a student; moving into a dorm requires a vacancy there.
    async fn edit(&self, student: student::Model) -> AppResult<Allocation>;

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<u64>;
}

/// Number of students living in `dorm_id`, optionally leaving one student out.
pub(crate) async fn count_occupants<C: ConnectionTrait>(
    conn: &C,
    dorm_id: i64,
    except: Option<i64>,
) -> Result<u64, DbErr> {
    let mut query = student::Entity::find().filter(student::Column::DormId.eq(dorm_id));
    if let Some(id) = except {
        query = query.filter(student::Column::Id.ne(id));
    }
    query.count(conn).await
}

/// Lock in a seat for `student_id` (None for a new student) inside `txn`.
///
/// Returns `None` when the seat is available, otherwise the rejection.
async fn reserve_seat(
    txn: &DatabaseTransaction,
    dorm_id: i64,
    student_id: Option<i64>,
) -> Result<Option<Allocation>, DbErr> {
    let Some(room) = dorm::Entity::find_by_id(dorm_id).one(txn).await? else {
        return Ok(Some(Allocation::DormMissing(dorm_id)));
    };
    let occupants = count_occupants(txn, dorm_id, student_id).await?;
    if room.has_vacancy(occupants) {
        Ok(None)
    } else {
        Ok(Some(Allocation::DormFull {
            dorm_id,
            max_num: room.max_num,
        }))
    }
}

#[derive(Clone)]
pub struct SeaOrmStudentDao {
    db: DatabaseConnection,
}

impl SeaOrmStudentDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentDao for SeaOrmStudentDao {
    async fn get_all(&self) -> AppResult<Vec<student::Model>> {
        Ok(student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Vec<StudentView>> {
        let mut query = student::Entity::find().find_also_related(dorm::Entity);
        if let Some(name) = name_filter(name) {
            query = query.filter(name_matches::<student::Entity>(
                student::Column::StudentName,
                name,
            ));
        }
        let rows = query
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(StudentView::from).collect())
    }

    async fn get_by_dorm(&self, dorm_id: i64) -> AppResult<Vec<student::Model>> {
        Ok(student::Entity::find()
            .filter(student::Column::DormId.eq(dorm_id))
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn save(&self, student: NewStudent) -> AppResult<Allocation> {
        let model = student::ActiveModel {
            student_no: Set(student.student_no),
            student_name: Set(student.student_name),
            sex: Set(student.sex),
            dorm_id: Set(student.dorm_id),
            ..Default::default()
        };

        let Some(dorm_id) = student.dorm_id else {
            let rows = student::Entity::insert(model)
                .exec_without_returning(&self.db)
                .await?;
            return Ok(Allocation::Applied(rows));
        };

        let txn = begin_serializable(&self.db).await?;
        if let Some(rejected) = reserve_seat(&txn, dorm_id, None).await? {
            txn.rollback().await?;
            return Ok(rejected);
        }
        let rows = student::Entity::insert(model)
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        Ok(Allocation::Applied(rows))
    }

    async fn edit(&self, student: student::Model) -> AppResult<Allocation> {
        let txn = begin_serializable(&self.db).await?;

        if let Some(dorm_id) = student.dorm_id {
            if let Some(rejected) = reserve_seat(&txn, dorm_id, Some(student.id)).await? {
                txn.rollback().await?;
                return Ok(rejected);
            }
        }

        let result = student::Entity::update_many()
            .col_expr(student::Column::StudentNo, Expr::value(student.student_no))
            .col_expr(student::Column::StudentName, Expr::value(student.student_name))
            .col_expr(student::Column::Sex, Expr::value(student.sex))
            .col_expr(student::Column::DormId, Expr::value(student.dorm_id))
            .filter(student::Column::Id.eq(student.id))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        Ok(Allocation::Applied(result.rows_affected))
    }

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = student::Entity::delete_many()
            .filter(student::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
