//! Local activity journal backed by the `activity_log` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use themeup_core::{ActivityKind, ActivityLogEntry, ActivityLogPort, ClientId, RepositoryError};

/// Append-only `SQLite` journal of update activity.
///
/// Also readable, unlike the remote activity table, so operators can see
/// what happened with `themeup activity`.
pub struct SqliteActivityLog {
    pool: SqlitePool,
}

impl SqliteActivityLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recent entries first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<ActivityLogEntry>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT client_id, update_id, version, activity, message, created_at
            FROM activity_log
            ORDER BY id DESC
            LIMIT ?
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: &SqliteRow) -> Result<ActivityLogEntry, RepositoryError> {
    let get = |column: &str| -> Result<String, RepositoryError> {
        row.try_get(column)
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    };

    let activity = get("activity")?;
    let activity: ActivityKind = activity
        .parse()
        .map_err(RepositoryError::Serialization)?;
    let created_at = get("created_at")?;
    let timestamp = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| RepositoryError::Serialization(format!("bad timestamp {created_at:?}: {e}")))?
        .with_timezone(&Utc);

    Ok(ActivityLogEntry {
        client_id: ClientId::from_stored(get("client_id")?),
        update_id: get("update_id")?,
        version: get("version")?,
        activity,
        message: row
            .try_get("message")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        timestamp,
    })
}

#[async_trait]
impl ActivityLogPort for SqliteActivityLog {
    async fn record(&self, entry: &ActivityLogEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO activity_log (client_id, update_id, version, activity, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(entry.client_id.as_str())
        .bind(&entry.update_id)
        .bind(&entry.version)
        .bind(entry.activity.as_str())
        .bind(entry.message.as_deref())
        .bind(entry.timestamp.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }
}
