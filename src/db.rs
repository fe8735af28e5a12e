use std::time::Duration;

use migration::Migrator;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::error::SeedResult;

/// Opens the single seeding connection and brings the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> SeedResult<DatabaseConnection> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;

    if db.get_database_backend() == DbBackend::Sqlite {
        db.execute(Statement::from_string(DbBackend::Sqlite, "PRAGMA foreign_keys = ON")).await?;
    }

    Migrator::up(&db, None).await?;
    info!("database schema up to date");

    Ok(db)
}
