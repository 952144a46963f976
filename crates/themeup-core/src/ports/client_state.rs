//! Client state repository port.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::ClientState;

/// Persistence for the single [`ClientState`] of this installation.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Works with the domain `ClientState` directly
/// - Implementations decide the storage layout (the SQLite one keeps one
///   key per field)
#[async_trait]
pub trait ClientStateRepository: Send + Sync {
    /// Load the stored state, or `None` on first run.
    async fn load(&self) -> Result<Option<ClientState>, RepositoryError>;

    /// Persist the full state.
    async fn save(&self, state: &ClientState) -> Result<(), RepositoryError>;
}
