//! Update registry port.
//!
//! The registry is an external, read-only store of [`UpdateRecord`]s. The
//! HTTP implementation lives in `themeup-remote`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{UpdateChannel, UpdateRecord};

/// Errors from registry lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry could not be reached.
    #[error("Registry unreachable: {message}")]
    Network { message: String },

    /// The registry answered with a non-success status.
    #[error("Registry request failed with status {status}")]
    Status { status: u16 },

    /// The response body was not the expected shape.
    #[error("Malformed registry response: {message}")]
    InvalidResponse { message: String },

    /// The registry is not configured for this client.
    #[error("Registry not configured: {message}")]
    Configuration { message: String },
}

/// Read-only access to the update registry.
#[async_trait]
pub trait UpdateRegistryPort: Send + Sync {
    /// Fetch the most recent active record in `channel`, if any.
    async fn latest_active(
        &self,
        channel: UpdateChannel,
    ) -> Result<Option<UpdateRecord>, RegistryError>;
}

/// Registry stand-in used when no registry URL is configured.
///
/// Every lookup fails with [`RegistryError::Configuration`], which the poller
/// treats like any other failed check.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredRegistry;

#[async_trait]
impl UpdateRegistryPort for UnconfiguredRegistry {
    async fn latest_active(
        &self,
        _channel: UpdateChannel,
    ) -> Result<Option<UpdateRecord>, RegistryError> {
        Err(RegistryError::Configuration {
            message: "THEMEUP_REGISTRY_URL is not set".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_registry_always_fails() {
        let registry = UnconfiguredRegistry;
        let err = registry
            .latest_active(UpdateChannel::Stable)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Configuration { .. }));
        assert!(err.to_string().contains("THEMEUP_REGISTRY_URL"));
    }
}
