//! Composition utilities for building the `SQLite` side of `UpdaterPorts`.
//!
//! Construction only; no domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::repositories::{SqliteActivityLog, SqliteClientStateRepository};

/// Factory for `SQLite`-backed adapters.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a client state repository from a pool.
    pub fn client_state_repository(pool: SqlitePool) -> Arc<SqliteClientStateRepository> {
        Arc::new(SqliteClientStateRepository::new(pool))
    }

    /// Create the local activity journal from a pool.
    pub fn activity_log(pool: SqlitePool) -> Arc<SqliteActivityLog> {
        Arc::new(SqliteActivityLog::new(pool))
    }
}

/// In-memory database with the production schema, for integration tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    pub async fn new() -> anyhow::Result<Self> {
        Ok(Self {
            pool: crate::setup::setup_test_database().await?,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn client_state_repository(&self) -> SqliteClientStateRepository {
        SqliteClientStateRepository::new(self.pool.clone())
    }

    pub fn activity_log(&self) -> SqliteActivityLog {
        SqliteActivityLog::new(self.pool.clone())
    }
}
