use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Connection pool settings resolved into the units sea-orm expects.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    pub fn from_settings(s: &configs::DatabaseConfig) -> Self {
        Self {
            url: s.url.clone(),
            max_connections: s.max_connections,
            min_connections: s.min_connections,
            connect_timeout: Duration::from_secs(s.connect_timeout_secs),
            idle_timeout: Duration::from_secs(s.idle_timeout_secs),
            max_lifetime: Duration::from_secs(s.max_lifetime_secs),
            acquire_timeout: Duration::from_secs(s.acquire_timeout_secs),
            sqlx_logging: s.sqlx_logging,
        }
    }

    /// Private SQLite database living as long as the pool.
    ///
    /// Every pooled connection to `sqlite::memory:` opens its own database,
    /// so the pool is pinned to exactly one long-lived connection.
    pub fn in_memory() -> Self {
        let day = Duration::from_secs(24 * 60 * 60);
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: day,
            max_lifetime: day,
            acquire_timeout: Duration::from_secs(5),
            sqlx_logging: false,
        }
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .acquire_timeout(self.acquire_timeout)
            .sqlx_logging(self.sqlx_logging);
        opt
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(cfg.connect_options()).await?;
    Ok(db)
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    info!(backend = ?db.get_database_backend(), "database migrated");
    Ok(db)
}

/// Round-trip a trivial statement to prove the pool is usable.
pub async fn test_connection(db: &DatabaseConnection) -> anyhow::Result<()> {
    db.ping().await?;
    Ok(())
}
