use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::dao::{
    SeaOrmBuildingDao, SeaOrmDormDao, SeaOrmRoleDao, SeaOrmStudentDao, SeaOrmUserDao,
};
use crate::service::{
    AuthService, BcryptHasher, BuildingService, DormService, PasswordHasher, StudentService,
    UserService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    pub buildings: Arc<BuildingService>,
    pub dorms: Arc<DormService>,
    pub students: Arc<StudentService>,
    pub users: Arc<UserService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wire the SeaORM DAOs and the services over one connection pool
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(BcryptHasher::new(config.security.bcrypt_cost));
        let users = Arc::new(SeaOrmUserDao::new(db.clone()));
        let roles = Arc::new(SeaOrmRoleDao::new(db.clone()));

        Self {
            config: Arc::new(config),
            buildings: Arc::new(BuildingService::new(Arc::new(SeaOrmBuildingDao::new(
                db.clone(),
            )))),
            dorms: Arc::new(DormService::new(Arc::new(SeaOrmDormDao::new(db.clone())))),
            students: Arc::new(StudentService::new(Arc::new(SeaOrmStudentDao::new(db)))),
            users: Arc::new(UserService::new(users.clone(), roles.clone())),
            auth: Arc::new(AuthService::new(users, roles, hasher)),
        }
    }
}
