//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repositories are minimal and load/save focused
//! - Remote ports describe intent (fetch latest, apply), not HTTP shapes

pub mod activity_log;
pub mod apply_endpoint;
pub mod client_state;
pub mod notification_sink;
pub mod update_registry;

use std::sync::Arc;
use thiserror::Error;

pub use activity_log::{ActivityLogPort, CompositeActivityLog};
pub use apply_endpoint::{ApplyEndpointPort, ApplyError, ApplyOutcome, ApplyRequest};
pub use client_state::ClientStateRepository;
pub use notification_sink::NotificationSinkPort;
pub use update_registry::{RegistryError, UnconfiguredRegistry, UpdateRegistryPort};

/// Container for all port trait objects the updater needs.
///
/// Adapters build one of these at their composition root and hand it to
/// `UpdaterCore::new`. It lives in core so the core never depends on the
/// adapter crates.
#[derive(Clone)]
pub struct UpdaterPorts {
    /// Where update records come from.
    pub registry: Arc<dyn UpdateRegistryPort>,
    /// Remote apply endpoint; `None` when only manual updates are possible.
    pub apply: Option<Arc<dyn ApplyEndpointPort>>,
    /// Local persisted client state.
    pub state: Arc<dyn ClientStateRepository>,
    /// Audit trail.
    pub activity: Arc<dyn ActivityLogPort>,
    /// Presenter for notifications.
    pub sink: Arc<dyn NotificationSinkPort>,
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (database, filesystem, remote table).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored data could not be decoded (e.g. corrupt local state).
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters map it to their own error types (CLI exit codes, HTTP statuses).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Local persistence failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The apply request could not be completed.
    #[error(transparent)]
    Apply(#[from] ApplyError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// A resolution was requested but no notification is visible.
    #[error("No update is pending")]
    NoPendingUpdate,

    /// Automatic apply is not available for this client.
    #[error("Automatic updates are not supported by this client; use the manual path")]
    AutomaticUnsupported,

    /// The apply endpoint answered `success: false`.
    #[error("Update {version} was rejected by the apply endpoint: {message}")]
    ApplyRejected { version: String, message: String },
}
