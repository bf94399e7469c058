use sea_orm::{Database, DatabaseConnection};

use crate::config::EngineConfig;
use crate::error::AppError;

/// Connect to the relational store. Does not run migrations; the hosting
/// process decides when `spades_migration::Migrator` runs.
pub async fn connect_db(config: &EngineConfig) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(&config.database_url).await?;
    Ok(conn)
}
