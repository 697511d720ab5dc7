use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::migration::Migrator;

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Apply every pending migration; already-applied ones are skipped.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    Migrator::up(conn, None).await?;
    Ok(())
}
