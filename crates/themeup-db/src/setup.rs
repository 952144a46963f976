//! Database setup and initialization.
//!
//! Entry points call [`setup_database`] with the resolved database path.

use anyhow::Result;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;
use tracing::debug;

/// Opens (creating if missing) the `SQLite` database and ensures the schema.
///
/// # Example
///
/// ```rust,no_run
/// use themeup_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/path/to/themeup.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true),
    )
    .await?;

    create_schema(&pool).await?;
    debug!(path = %db_path.display(), "State database ready");

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database with the production schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = SqlitePool::connect("sqlite::memory:").await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete schema. Safe to call repeatedly.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Key/value client state: theme_version, client_id, automatic_updates_supported
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS client_state (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS activity_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id TEXT NOT NULL,
            update_id TEXT NOT NULL,
            version TEXT NOT NULL,
            activity TEXT NOT NULL,
            message TEXT,
            created_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_activity_log_update ON activity_log(update_id)")
        .execute(pool)
        .await?;

    Ok(())
}
