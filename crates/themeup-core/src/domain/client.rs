//! Client identity and installed-version state.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Locally generated pseudo-identifier used to attribute activity rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Generate a fresh random client id (`client_<32 hex chars>`).
    pub fn generate() -> Self {
        Self(format!("client_{}", Uuid::new_v4().simple()))
    }

    /// Wrap an id read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State persisted by the client between runs.
///
/// Created on first run and mutated only when an update is applied
/// automatically or marked as applied by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    pub client_id: ClientId,
    /// Version of the theme this client believes is installed.
    pub current_version: String,
    /// Whether the remote apply endpoint is configured for this client.
    pub automatic_updates_supported: bool,
}

impl ClientState {
    /// First-run state with a freshly generated client id.
    pub fn first_run(initial_version: impl Into<String>, automatic_updates_supported: bool) -> Self {
        Self {
            client_id: ClientId::generate(),
            current_version: initial_version.into(),
            automatic_updates_supported,
        }
    }
}
