pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./users.db?mode=rwc")
    pub url: String,
    /// Upper bound of the connection pool; `None` keeps the driver default.
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./users.db?mode=rwc".to_string(),
            max_connections: None,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if let Some(max) = config.max_connections {
        options.max_connections(max);
    }

    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Migrated in-memory SQLite database for tests.
///
/// Pinned to a single pooled connection: every new `:memory:` connection
/// would otherwise open a separate, empty database.
#[cfg(test)]
pub(crate) async fn connect_in_memory() -> DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(3600))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite should open");
    migrator::Migrator::up(&db, None)
        .await
        .expect("migrations should apply");
    db
}
