//! Path-related error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during path resolution and directory operations.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the user's home directory.
    #[error("Cannot determine home directory")]
    NoHomeDir,

    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,

    /// Failed to read or write the environment file.
    #[error("Failed to access env file {path}: {reason}")]
    EnvFileError { path: PathBuf, reason: String },

    /// A key that cannot be written to the environment file.
    #[error("Invalid env key '{0}'")]
    InvalidEnvKey(String),

    /// A value spanning more than one line of the environment file.
    #[error("Invalid value for env key '{0}': line breaks are not allowed")]
    InvalidEnvValue(String),

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),
}
