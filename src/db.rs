use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;

use crate::error::Result;

pub type DbPool = SqlitePool;

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(db_path: &Path) -> Result<DbPool> {
  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  log::info!("Initializing database at: {}", db_path.display());

  // Create connection pool
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .map_err(sqlx::Error::from)?;

  log::info!("Database initialized successfully");

  Ok(pool)
}
