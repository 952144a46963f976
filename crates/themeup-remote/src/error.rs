//! Internal error types for the HTTP adapters.
//!
//! These errors are internal to `themeup-remote` and are mapped to core port
//! errors at the boundary.

use themeup_core::{ApplyError, RegistryError, RepositoryError};
use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors talking to the registry or the apply endpoint.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The server answered with a non-success status.
    #[error("Request failed with status {status}: {url}")]
    RequestFailed {
        status: u16,
        url: String,
        /// Response body, if one could be read
        body: Option<String>,
    },

    /// The response was not the expected shape.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// A required endpoint or key is missing.
    #[error("{what} is not configured")]
    NotConfigured { what: &'static str },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convert to the registry port error.
pub(crate) fn to_registry_error(err: RemoteError) -> RegistryError {
    match err {
        RemoteError::RequestFailed { status, .. } => RegistryError::Status { status },
        RemoteError::InvalidResponse { message } => RegistryError::InvalidResponse { message },
        RemoteError::JsonParse(e) => RegistryError::InvalidResponse {
            message: e.to_string(),
        },
        RemoteError::Network(e) if e.is_decode() => RegistryError::InvalidResponse {
            message: e.to_string(),
        },
        RemoteError::Network(e) => RegistryError::Network {
            message: e.to_string(),
        },
        e @ (RemoteError::NotConfigured { .. } | RemoteError::InvalidUrl(_)) => {
            RegistryError::Configuration {
                message: e.to_string(),
            }
        }
    }
}

/// Convert to the apply port error.
pub(crate) fn to_apply_error(err: RemoteError) -> ApplyError {
    match err {
        RemoteError::RequestFailed { status, .. } => ApplyError::Status { status },
        RemoteError::InvalidResponse { message } => ApplyError::InvalidResponse { message },
        RemoteError::JsonParse(e) => ApplyError::InvalidResponse {
            message: e.to_string(),
        },
        RemoteError::Network(e) if e.is_decode() => ApplyError::InvalidResponse {
            message: e.to_string(),
        },
        RemoteError::Network(e) => ApplyError::Network {
            message: e.to_string(),
        },
        e @ (RemoteError::NotConfigured { .. } | RemoteError::InvalidUrl(_)) => {
            ApplyError::Configuration {
                message: e.to_string(),
            }
        }
    }
}

/// Convert to the repository error used by the activity log port.
pub(crate) fn to_repository_error(err: RemoteError) -> RepositoryError {
    match err {
        RemoteError::JsonParse(e) => RepositoryError::Serialization(e.to_string()),
        other => RepositoryError::Storage(other.to_string()),
    }
}
