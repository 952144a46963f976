//! `SQLite` implementation of the `ClientStateRepository` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use themeup_core::{ClientId, ClientState, ClientStateRepository, RepositoryError};

const KEY_VERSION: &str = "theme_version";
const KEY_CLIENT_ID: &str = "client_id";
const KEY_AUTOMATIC: &str = "automatic_updates_supported";

/// Stores [`ClientState`] as three rows of the `client_state` key/value table.
pub struct SqliteClientStateRepository {
    pool: SqlitePool,
}

impl SqliteClientStateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn storage(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

#[async_trait]
impl ClientStateRepository for SqliteClientStateRepository {
    async fn load(&self) -> Result<Option<ClientState>, RepositoryError> {
        let rows = sqlx::query("SELECT key, value FROM client_state WHERE key IN (?, ?, ?)")
            .bind(KEY_VERSION)
            .bind(KEY_CLIENT_ID)
            .bind(KEY_AUTOMATIC)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        let mut version = None;
        let mut client_id = None;
        let mut automatic = None;
        for row in rows {
            let key: String = row.try_get("key").map_err(storage)?;
            let value: String = row.try_get("value").map_err(storage)?;
            match key.as_str() {
                KEY_VERSION => version = Some(value),
                KEY_CLIENT_ID => client_id = Some(value),
                KEY_AUTOMATIC => automatic = Some(value),
                _ => {}
            }
        }

        let (version, client_id) = match (version, client_id) {
            (None, None) => return Ok(None),
            (Some(version), Some(client_id)) if !client_id.trim().is_empty() => {
                (version, client_id)
            }
            _ => {
                return Err(RepositoryError::Serialization(
                    "client_state is incomplete: theme_version and client_id must both be set"
                        .to_string(),
                ));
            }
        };

        let automatic_updates_supported = match automatic.as_deref() {
            None | Some("false" | "0") => false,
            Some("true" | "1") => true,
            Some(other) => {
                return Err(RepositoryError::Serialization(format!(
                    "invalid {KEY_AUTOMATIC} value: {other:?}"
                )));
            }
        };

        Ok(Some(ClientState {
            client_id: ClientId::from_stored(client_id),
            current_version: version,
            automatic_updates_supported,
        }))
    }

    async fn save(&self, state: &ClientState) -> Result<(), RepositoryError> {
        let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let automatic = if state.automatic_updates_supported {
            "true"
        } else {
            "false"
        };

        let mut tx = self.pool.begin().await.map_err(storage)?;
        for (key, value) in [
            (KEY_VERSION, state.current_version.as_str()),
            (KEY_CLIENT_ID, state.client_id.as_str()),
            (KEY_AUTOMATIC, automatic),
        ] {
            sqlx::query(
                "INSERT OR REPLACE INTO client_state (key, value, updated_at) VALUES (?, ?, ?)",
            )
            .bind(key)
            .bind(value)
            .bind(&updated_at)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        }
        tx.commit().await.map_err(storage)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn repo() -> SqliteClientStateRepository {
        SqliteClientStateRepository::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_load_empty_is_first_run() {
        let repo = repo().await;
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = repo().await;
        let state = ClientState {
            client_id: ClientId::from_stored("client_abc"),
            current_version: "1.4.0".to_string(),
            automatic_updates_supported: true,
        };

        repo.save(&state).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(state.clone()));

        let bumped = ClientState {
            current_version: "1.5.0".to_string(),
            ..state
        };
        repo.save(&bumped).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(bumped));
    }

    #[tokio::test]
    async fn test_missing_client_id_is_corrupt() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO client_state (key, value, updated_at) VALUES ('theme_version', '1.0.0', '')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        assert!(matches!(
            repo.load().await,
            Err(RepositoryError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_garbage_automatic_flag_is_corrupt() {
        let repo = repo().await;
        repo.save(&ClientState {
            client_id: ClientId::from_stored("client_abc"),
            current_version: "1.0.0".to_string(),
            automatic_updates_supported: false,
        })
        .await
        .unwrap();
        sqlx::query("UPDATE client_state SET value = 'maybe' WHERE key = 'automatic_updates_supported'")
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(matches!(
            repo.load().await,
            Err(RepositoryError::Serialization(_))
        ));
    }
}
