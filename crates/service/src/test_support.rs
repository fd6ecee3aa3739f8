#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_and_migrate, DatabaseConfig};

// Every test gets its own in-memory database, so nothing leaks between them.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    connect_and_migrate(&DatabaseConfig::in_memory()).await
}
