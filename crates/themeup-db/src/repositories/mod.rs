//! Repository implementations using `SQLite`.
//!
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod sqlite_activity_log;
mod sqlite_client_state_repository;

pub use sqlite_activity_log::SqliteActivityLog;
pub use sqlite_client_state_repository::SqliteClientStateRepository;
