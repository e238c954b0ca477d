#![allow(dead_code)]

use sea_orm::DatabaseConnection;

use dormitory::config::{Config, DatabaseConfig};
use dormitory::db;
use dormitory::entity::building::NewBuilding;
use dormitory::entity::dorm::NewDorm;
use dormitory::entity::student::NewStudent;

/// bcrypt's minimum cost keeps the suite fast
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database = DatabaseConfig {
        db_type: "sqlite".to_string(),
        name: ":memory:".to_string(),
        ..DatabaseConfig::default()
    };
    config.security.bcrypt_cost = TEST_BCRYPT_COST;
    config
}

/// Fresh in-memory database with the full schema
pub async fn setup_db() -> DatabaseConnection {
    db::init_database(&test_config().database)
        .await
        .expect("in-memory database")
}

pub fn new_building(name: &str) -> NewBuilding {
    NewBuilding {
        name: name.to_string(),
        building_type: 1,
        remark: None,
    }
}

pub fn new_dorm(name: &str, building_id: i64, max_num: i32) -> NewDorm {
    NewDorm {
        name: name.to_string(),
        building_id,
        max_num,
        remark: None,
    }
}

pub fn new_student(student_no: &str, name: &str, dorm_id: Option<i64>) -> NewStudent {
    NewStudent {
        student_no: student_no.to_string(),
        student_name: name.to_string(),
        sex: 1,
        dorm_id,
    }
}

/// SQLite file under the temp dir, pooled like a real deployment.
///
/// Returns the connection and the file path so the caller can remove it.
pub async fn setup_file_db(tag: &str) -> (DatabaseConnection, std::path::PathBuf) {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "dormitory-{}-{}-{}.db",
        tag,
        std::process::id(),
        nanos
    ));
    let config = DatabaseConfig {
        db_type: "sqlite".to_string(),
        name: path.to_string_lossy().into_owned(),
        max_connections: 8,
        ..DatabaseConfig::default()
    };
    let db = db::init_database(&config).await.expect("file database");
    (db, path)
}
