//! SQLite pool setup.
//!
//! Runs the embedded migrations on connect. Tests use the in-memory
//! constructor, which pins the pool to a single connection so the database
//! lives as long as the pool.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::StorageError;

/// Connect to the database at `database_url` (e.g. `sqlite://blood.db`),
/// creating the file if missing, and apply migrations.
///
/// The busy timeout is what serializes decision transactions across
/// connections: a second writer's `BEGIN IMMEDIATE` waits here for the
/// first to commit.
pub async fn connect(database_url: &str) -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::ConnectionError(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Connect to a fresh in-memory database and apply migrations.
pub async fn connect_in_memory() -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| StorageError::ConnectionError(e.to_string()))?
        .foreign_keys(true);

    // A single connection keeps the in-memory database alive and shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
