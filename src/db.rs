use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::error::DataError;

pub type DbPool = SqlitePool;

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(config: &Config) -> Result<DbPool, DataError> {
  tracing::info!("Initializing database at: {}", config.database_url);

  let pool = SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .connect(&config.database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}
