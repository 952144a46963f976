//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use themeup_core::{CoreError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Registry or apply endpoint unreachable or misbehaving.
    #[error("Remote error: {0}")]
    Remote(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
            Self::Remote(_) => 69,   // EX_UNAVAILABLE
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Registry(registry_err) => Self::Remote(registry_err.to_string()),
            CoreError::Apply(apply_err) => Self::Remote(apply_err.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            other @ (CoreError::NoPendingUpdate
            | CoreError::AutomaticUnsupported
            | CoreError::ApplyRejected { .. }) => Self::Core(other.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::InvalidEnvKey(_) | PathError::InvalidEnvValue(_) => {
                Self::Arguments(err.to_string())
            }
            other => Self::Io(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error bubbled up to `main`.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(core) = err.downcast_ref::<CoreError>() {
        return match core {
            CoreError::Repository(_) => 73,
            CoreError::Registry(_) | CoreError::Apply(_) => 69,
            CoreError::Settings(_) => 78,
            _ => 1,
        };
    }
    1
}
