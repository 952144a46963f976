//! Path utilities for themeup data directories.
//!
//! This module provides the canonical path resolution for all themeup
//! components:
//! - Data root (state database, `.env` overrides)
//! - Database location
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle output themselves
//! - OS-specific logic is kept private in `platform`

mod config;
mod database;
mod error;
mod platform;
mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{env_file_path, persist_env_value};
pub use database::database_path;
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};
pub use resolver::ResolvedPaths;
