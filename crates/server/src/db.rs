use classlog_migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Connects and brings the schema up to date. The schema is created from
/// scratch on a fresh store; there is no separate migration tooling.
pub async fn init_pool_and_migrate(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}
