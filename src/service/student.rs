//! Student service
//!
//! Placing a student into a dorm (on registration or reallocation) is only
//! allowed while the dorm has a vacancy; the DAO runs that check and the
//! write in one transaction and this service turns a refusal into
//! [`AppError::CapacityExceeded`].

use std::sync::Arc;

use super::{require, settle, ResponsePage};
use crate::dao::StudentDao;
use crate::entity::student::{self, NewStudent, Sex, StudentView};
use crate::entity::{ids_of, Identified};
use crate::error::{AppError, AppResult};

pub struct StudentService {
    dao: Arc<dyn StudentDao>,
}

impl StudentService {
    pub fn new(dao: Arc<dyn StudentDao>) -> Self {
        Self { dao }
    }

    pub async fn get_all(&self) -> AppResult<Vec<student::Model>> {
        self.dao.get_all().await
    }

    pub async fn get_page(
        &self,
        page: i64,
        size: i64,
        name: Option<&str>,
    ) -> AppResult<ResponsePage<StudentView>> {
        let matches = self.dao.get_by_name(name.unwrap_or_default()).await?;
        Ok(ResponsePage::from_full(matches, page, size))
    }

    pub async fn get_by_dorm(&self, dorm_id: i64) -> AppResult<Vec<student::Model>> {
        self.dao.get_by_dorm(dorm_id).await
    }

    pub async fn save(&self, student: NewStudent) -> AppResult<u64> {
        validate(&student.student_no, &student.student_name, student.sex)?;
        settle(self.dao.save(student).await?)
    }

    pub async fn edit(&self, student: student::Model) -> AppResult<u64> {
        validate(&student.student_no, &student.student_name, student.sex)?;
        settle(self.dao.edit(student).await?)
    }

    pub async fn delete_batch<E: Identified>(&self, students: &[E]) -> AppResult<u64> {
        let ids = ids_of(students);
        let removed = self.dao.delete_batch(&ids).await?;
        tracing::info!("Deleted {} of {} students", removed, ids.len());
        Ok(removed)
    }
}

fn validate(student_no: &str, student_name: &str, sex: i32) -> AppResult<()> {
    require(student_no, "student number")?;
    require(student_name, "student name")?;
    Sex::try_from(sex).map_err(|code| AppError::Validation(format!("unknown sex {}", code)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::student::MockStudentDao;
    use crate::dao::Allocation;

    fn student(id: i64, student_no: &str, name: &str, dorm_id: Option<i64>) -> student::Model {
        student::Model {
            id,
            student_no: student_no.to_string(),
            student_name: name.to_string(),
            sex: 1,
            dorm_id,
        }
    }

    fn view(id: i64, student_no: &str, name: &str) -> StudentView {
        StudentView {
            student: student(id, student_no, name, Some(1)),
            dorm_name: Some("101".to_string()),
        }
    }

    fn new_student(student_no: &str, name: &str, dorm_id: Option<i64>) -> NewStudent {
        NewStudent {
            student_no: student_no.to_string(),
            student_name: name.to_string(),
            sex: 1,
            dorm_id,
        }
    }

    #[tokio::test]
    async fn test_get_page_by_name() {
        let mut dao = MockStudentDao::new();
        dao.expect_get_by_name()
            .withf(|name| name == "张三")
            .times(1)
            .returning(|_| Ok(vec![view(1, "2021001", "张三"), view(2, "2021002", "张三丰")]));

        let service = StudentService::new(Arc::new(dao));
        let page = service.get_page(1, 10, Some("张三")).await.unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total, Some(2));
    }

    #[tokio::test]
    async fn test_get_page_no_match_is_empty_not_missing() {
        let mut dao = MockStudentDao::new();
        dao.expect_get_by_name().times(1).returning(|_| Ok(Vec::new()));

        let service = StudentService::new(Arc::new(dao));
        let page = service.get_page(1, 10, Some("不存在的学生")).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total, Some(0));
        assert_eq!(page.total_pages(), 0);
    }

    #[tokio::test]
    async fn test_save() {
        let mut dao = MockStudentDao::new();
        dao.expect_save()
            .withf(|s| s.student_no == "2021003" && s.dorm_id == Some(1))
            .times(1)
            .returning(|_| Ok(Allocation::Applied(1)));

        let service = StudentService::new(Arc::new(dao));
        let result = service.save(new_student("2021003", "李四", Some(1))).await.unwrap();

        assert_eq!(result, 1);
    }

    #[tokio::test]
    async fn test_save_into_full_dorm_is_rejected() {
        let mut dao = MockStudentDao::new();
        dao.expect_save().times(1).returning(|_| {
            Ok(Allocation::DormFull {
                dorm_id: 1,
                max_num: 2,
            })
        });

        let service = StudentService::new(Arc::new(dao));
        let result = service.save(new_student("2021005", "孙七", Some(1))).await;

        assert!(matches!(
            result,
            Err(AppError::CapacityExceeded { dorm_id: 1, max_num: 2 })
        ));
    }

    #[tokio::test]
    async fn test_save_into_unknown_dorm() {
        let mut dao = MockStudentDao::new();
        dao.expect_save()
            .times(1)
            .returning(|_| Ok(Allocation::DormMissing(99)));

        let service = StudentService::new(Arc::new(dao));
        let result = service.save(new_student("2021006", "周八", Some(99))).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_validates_before_dao() {
        let mut dao = MockStudentDao::new();
        dao.expect_save().times(0);

        let service = StudentService::new(Arc::new(dao));
        let mut invalid = new_student("2021007", "吴九", None);
        invalid.sex = 5;

        assert!(matches!(
            service.save(invalid).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.save(new_student("", "吴九", None)).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_edit_moves_student() {
        let mut dao = MockStudentDao::new();
        dao.expect_edit()
            .withf(|s| s.id == 1 && s.dorm_id == Some(2))
            .times(1)
            .returning(|_| Ok(Allocation::Applied(1)));

        let service = StudentService::new(Arc::new(dao));
        let result = service
            .edit(student(1, "2021001", "张三", Some(2)))
            .await
            .unwrap();

        assert_eq!(result, 1);
    }

    #[tokio::test]
    async fn test_get_by_dorm() {
        let mut dao = MockStudentDao::new();
        dao.expect_get_by_dorm()
            .withf(|dorm_id| *dorm_id == 3)
            .times(1)
            .returning(|dorm_id| {
                Ok(vec![
                    student(1, "2021003", "王五", Some(dorm_id)),
                    student(2, "2021004", "赵六", Some(dorm_id)),
                ])
            });

        let service = StudentService::new(Arc::new(dao));
        assert_eq!(service.get_by_dorm(3).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_batch() {
        let mut dao = MockStudentDao::new();
        dao.expect_delete_batch()
            .withf(|ids| ids.to_vec() == vec![1, 2])
            .times(1)
            .returning(|_| Ok(2));

        let service = StudentService::new(Arc::new(dao));
        let students = vec![
            student(1, "2021001", "张三", Some(1)),
            student(2, "2021002", "李四", Some(1)),
        ];

        assert_eq!(service.delete_batch(&students).await.unwrap(), 2);
    }
}
