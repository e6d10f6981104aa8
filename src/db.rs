use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Connect to the ledger database and bring the schema up to date.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let backend = if database_url.starts_with("postgres") {
        "PostgreSQL"
    } else {
        "SQLite"
    };
    tracing::info!(backend, "Connecting to database");

    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Each SQLite connection would otherwise see its own in-memory database
    if database_url.contains(":memory:") {
        options.max_connections(1);
    }

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied");

    Ok(db)
}
