mod common;

use std::sync::Arc;

use dormitory::dao::{SeaOrmBuildingDao, SeaOrmDormDao, SeaOrmStudentDao};
use dormitory::entity::{building, EntityRef};
use dormitory::error::AppError;
use dormitory::service::{BuildingService, DormService, ResponsePage, StudentService};
use sea_orm::DatabaseConnection;

use common::{new_building, new_dorm, new_student, setup_db};

struct Services {
    buildings: BuildingService,
    dorms: DormService,
    students: StudentService,
}

fn services(db: &DatabaseConnection) -> Services {
    Services {
        buildings: BuildingService::new(Arc::new(SeaOrmBuildingDao::new(db.clone()))),
        dorms: DormService::new(Arc::new(SeaOrmDormDao::new(db.clone()))),
        students: StudentService::new(Arc::new(SeaOrmStudentDao::new(db.clone()))),
    }
}

/// Building "A" with dorm "301" (max 2); returns the dorm id
async fn dorm_301(s: &Services) -> i64 {
    assert_eq!(s.buildings.save(new_building("A")).await.unwrap(), 1);
    let building_id = s.buildings.get_all().await.unwrap()[0].id;
    assert_eq!(s.dorms.save(new_dorm("301", building_id, 2)).await.unwrap(), 1);
    s.dorms.get_all().await.unwrap()[0].id
}

#[tokio::test]
async fn test_dorm_fills_up_and_rejects_third_student() {
    let db = setup_db().await;
    let s = services(&db);
    let dorm_id = dorm_301(&s).await;

    assert_eq!(s.students.save(new_student("S1", "Alice", Some(dorm_id))).await.unwrap(), 1);
    assert_eq!(s.students.save(new_student("S2", "Bob", Some(dorm_id))).await.unwrap(), 1);
    assert_eq!(s.students.get_by_dorm(dorm_id).await.unwrap().len(), 2);

    let third = s.students.save(new_student("S3", "Carol", Some(dorm_id))).await;
    assert!(matches!(
        third,
        Err(AppError::CapacityExceeded { dorm_id: id, max_num: 2 }) if id == dorm_id
    ));
    assert_eq!(s.students.get_all().await.unwrap().len(), 2);

    let occupancy = s.dorms.occupancy(dorm_id).await.unwrap();
    assert_eq!(occupancy.occupants, 2);
    assert_eq!(occupancy.vacancies, 0);
}

#[tokio::test]
async fn test_moving_into_full_dorm_is_rejected() {
    let db = setup_db().await;
    let s = services(&db);
    let full = dorm_301(&s).await;
    let building_id = s.buildings.get_all().await.unwrap()[0].id;
    s.dorms.save(new_dorm("302", building_id, 4)).await.unwrap();
    let other = s.dorms.get_page(1, 10, Some("302")).await.unwrap().data[0].dorm.id;

    s.students.save(new_student("S1", "Alice", Some(full))).await.unwrap();
    s.students.save(new_student("S2", "Bob", Some(full))).await.unwrap();
    s.students.save(new_student("S3", "Carol", Some(other))).await.unwrap();

    let mut carol = s.students.get_by_dorm(other).await.unwrap().remove(0);
    carol.dorm_id = Some(full);
    assert!(matches!(
        s.students.edit(carol.clone()).await,
        Err(AppError::CapacityExceeded { .. })
    ));

    // A student already in the full dorm can still be edited in place
    let mut alice = s.students.get_by_dorm(full).await.unwrap().remove(0);
    alice.student_name = "Alice Liddell".to_string();
    assert_eq!(s.students.edit(alice).await.unwrap(), 1);
    assert_eq!(s.students.get_by_dorm(full).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_dorm_is_not_found() {
    let db = setup_db().await;
    let s = services(&db);

    let result = s.students.save(new_student("S1", "Alice", Some(999))).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_shrinking_dorm_below_head_count_is_rejected() {
    let db = setup_db().await;
    let s = services(&db);
    let dorm_id = dorm_301(&s).await;
    s.students.save(new_student("S1", "Alice", Some(dorm_id))).await.unwrap();
    s.students.save(new_student("S2", "Bob", Some(dorm_id))).await.unwrap();

    let mut dorm = s.dorms.get_all().await.unwrap().remove(0);
    dorm.max_num = 1;
    assert!(matches!(
        s.dorms.edit(dorm.clone()).await,
        Err(AppError::CapacityExceeded { .. })
    ));

    dorm.max_num = 3;
    assert_eq!(s.dorms.edit(dorm).await.unwrap(), 1);
    assert_eq!(s.dorms.occupancy(dorm_id).await.unwrap().vacancies, 1);
}

#[tokio::test]
async fn test_repeated_delete_returns_zero() {
    let db = setup_db().await;
    let s = services(&db);
    s.students.save(new_student("S1", "Alice", None)).await.unwrap();
    let id = s.students.get_all().await.unwrap()[0].id;

    let batch = [EntityRef { id }, EntityRef { id: 999 }];
    assert_eq!(s.students.delete_batch(&batch).await.unwrap(), 1);
    assert_eq!(s.students.delete_batch(&batch).await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleting_dorm_unassigns_students() {
    let db = setup_db().await;
    let s = services(&db);
    let dorm_id = dorm_301(&s).await;
    s.students.save(new_student("S1", "Alice", Some(dorm_id))).await.unwrap();

    assert_eq!(s.dorms.delete_batch(&[EntityRef { id: dorm_id }]).await.unwrap(), 1);

    let students = s.students.get_all().await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].dorm_id, None);
}

#[tokio::test]
async fn test_building_with_dorms_cannot_be_deleted() {
    let db = setup_db().await;
    let s = services(&db);
    dorm_301(&s).await;
    let building_id = s.buildings.get_all().await.unwrap()[0].id;

    let result = s.buildings.delete_batch(&[EntityRef { id: building_id }]).await;
    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
async fn test_pages_carry_related_names() {
    let db = setup_db().await;
    let s = services(&db);
    let dorm_id = dorm_301(&s).await;
    for (no, name) in [("S1", "Alice"), ("S2", "Alina"), ("S3", "Bob")] {
        let dorm = (no != "S3").then_some(dorm_id);
        s.students.save(new_student(no, name, dorm)).await.unwrap();
    }

    let page = s.students.get_page(1, 1, Some("Ali")).await.unwrap();
    assert_eq!(page.total, Some(2));
    assert_eq!(page.total_pages(), 2);
    assert_eq!(page.data[0].student.student_name, "Alice");
    assert_eq!(page.data[0].dorm_name.as_deref(), Some("301"));

    let page = s.students.get_page(3, 1, Some("Ali")).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, Some(2));

    let everyone = s.students.get_page(1, 10, None).await.unwrap();
    assert_eq!(everyone.total, Some(3));
    assert_eq!(everyone.data[2].dorm_name, None);

    let dorms = s.dorms.get_page(1, 10, None).await.unwrap();
    assert_eq!(dorms.data[0].building_name.as_deref(), Some("A"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_never_overfill_dorm() {
    let (db, path) = common::setup_file_db("concurrent").await;
    let s = services(&db);
    let dorm_id = dorm_301(&s).await;
    let students = Arc::new(StudentService::new(Arc::new(SeaOrmStudentDao::new(db.clone()))));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let students = students.clone();
            tokio::spawn(async move {
                students
                    .save(new_student(&format!("C{i}"), "Racer", Some(dorm_id)))
                    .await
            })
        })
        .collect();

    let mut placed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(rows) => placed += rows,
            // Lost the race: either refused outright or aborted by the store
            Err(AppError::CapacityExceeded { .. }) | Err(AppError::Database(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let occupants = s.students.get_by_dorm(dorm_id).await.unwrap().len();
    assert!(placed <= 2, "placed {placed} students into a dorm of 2");
    assert!(occupants <= 2, "dorm holds {occupants} students, max is 2");

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_name_filter_treats_wildcards_literally() {
    let db = setup_db().await;
    let s = services(&db);
    for name in ["100%", "A_1", "AB1"] {
        s.buildings.save(new_building(name)).await.unwrap();
    }

    let names = |page: ResponsePage<building::Model>| {
        page.data.into_iter().map(|b| b.name).collect::<Vec<_>>()
    };

    assert_eq!(names(s.buildings.get_page(1, 10, Some("%")).await.unwrap()), vec!["100%"]);
    assert_eq!(names(s.buildings.get_page(1, 10, Some("_")).await.unwrap()), vec!["A_1"]);
    assert_eq!(names(s.buildings.get_page(1, 10, Some("ab")).await.unwrap()), vec!["AB1"]);
    assert_eq!(s.buildings.get_page(1, 10, None).await.unwrap().total, Some(3));
}
