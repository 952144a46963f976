//! `SQLite` adapters for themeup.
//!
//! Persists the client state (installed version, client id, automatic
//! update flag) and a local journal of update activity.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

pub use factory::CoreFactory;

#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::{SqliteActivityLog, SqliteClientStateRepository};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
