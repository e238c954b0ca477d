use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbBackend, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Schema, Set, Statement,
    TransactionTrait,
};
use std::time::Duration;
use tracing::info;

use crate::config::{AdminConfig, DatabaseConfig};
use crate::entity::{building, dorm, role, student, user, user_role};
use crate::error::AppResult;
use crate::service::PasswordHasher;

/// Open the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let database_url = config.connection_url();

    if config.is_sqlite() {
        info!("Connecting to sqlite database: {}", config.name);
    } else {
        info!("Connecting to database: {}:{}/{}", config.host, config.port, config.name);
    }

    let mut opt = ConnectOptions::new(&database_url);
    opt.connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    if config.is_sqlite() && config.name == ":memory:" {
        // Every connection would get its own empty database
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(config.max_connections).min_connections(1);
    }
    if !config.is_sqlite() {
        opt.set_schema_search_path("public");
    }

    let db = Database::connect(opt).await?;
    info!("Database connection established");
    Ok(db)
}

/// Connect and bring the schema up to date
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let db = connect(config).await?;
    sync_schema(&db).await?;
    Ok(db)
}

/// Create any missing tables (similar to GORM AutoMigrate)
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Running schema sync for all entities...");

    // Referenced tables first
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(building::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(dorm::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(student::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(user::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(role::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(user_role::Entity)).await?;

    info!("Schema sync completed successfully");
    Ok(())
}

/// Create a table if it doesn't exist
async fn create_table_if_not_exists(
    db: &DatabaseConnection,
    backend: DbBackend,
    mut stmt: TableCreateStatement,
) -> Result<(), DbErr> {
    stmt.if_not_exists();
    let sql = backend.build(&stmt);
    db.execute(Statement::from_string(backend, sql.to_string())).await?;
    Ok(())
}

/// Insert the built-in roles and, on an empty user table, the admin account.
pub async fn seed_defaults(
    db: &DatabaseConnection,
    admin: &AdminConfig,
    hasher: &dyn PasswordHasher,
) -> AppResult<()> {
    let mut role_ids = Vec::new();
    for name in [role::ROLE_ADMIN, role::ROLE_USER] {
        let existing = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(db)
            .await?;
        let id = match existing {
            Some(existing) => existing.id,
            None => {
                info!("Seeding role {}", name);
                role::ActiveModel {
                    name: Set(name.to_string()),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
        };
        role_ids.push(id);
    }

    if user::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let hash = hasher.hash(&admin.password)?;
    let txn = db.begin().await?;
    let created = user::ActiveModel {
        username: Set(admin.username.clone()),
        password: Set(hash),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    for role_id in role_ids {
        user_role::ActiveModel {
            user_id: Set(created.id),
            role_id: Set(role_id),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    info!("Seeded admin account {}", admin.username);
    Ok(())
}
