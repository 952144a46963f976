//! Client state service - owns first-run initialization and version writes.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::ClientState;
use crate::ports::{ClientStateRepository, CoreError};
use crate::version;

/// Service for the locally persisted [`ClientState`].
///
/// `current_version` only moves forward: writes go through
/// [`record_applied`](Self::record_applied), which drops anything that is not
/// strictly newer than what is stored.
pub struct ClientStateService {
    repo: Arc<dyn ClientStateRepository>,
    initial_version: String,
    automatic_updates_supported: bool,
    // Serializes load-or-init and read-modify-write cycles.
    guard: Mutex<()>,
}

impl ClientStateService {
    /// Create a new client state service.
    ///
    /// `initial_version` is used on first run; `automatic_updates_supported`
    /// reflects the current configuration and is synced into storage.
    pub fn new(
        repo: Arc<dyn ClientStateRepository>,
        initial_version: impl Into<String>,
        automatic_updates_supported: bool,
    ) -> Self {
        Self {
            repo,
            initial_version: initial_version.into(),
            automatic_updates_supported,
            guard: Mutex::new(()),
        }
    }

    /// Get the current state, creating and persisting it on first run.
    pub async fn current(&self) -> Result<ClientState, CoreError> {
        let _guard = self.guard.lock().await;
        self.load_or_init().await
    }

    /// Record that `version` is now installed.
    ///
    /// Returns `Ok(false)` without writing if `version` is not strictly newer
    /// than the stored version.
    pub async fn record_applied(&self, version: &str) -> Result<bool, CoreError> {
        let _guard = self.guard.lock().await;
        let mut state = self.load_or_init().await?;

        if !version::is_newer(version, &state.current_version) {
            warn!(
                stored = %state.current_version,
                requested = %version,
                "Ignoring version write that would not move forward"
            );
            return Ok(false);
        }

        let previous = std::mem::replace(&mut state.current_version, version.to_string());
        self.repo.save(&state).await?;
        info!(from = %previous, to = %version, "Recorded installed theme version");
        Ok(true)
    }

    async fn load_or_init(&self) -> Result<ClientState, CoreError> {
        match self.repo.load().await? {
            Some(mut state) => {
                if state.automatic_updates_supported != self.automatic_updates_supported {
                    state.automatic_updates_supported = self.automatic_updates_supported;
                    self.repo.save(&state).await?;
                }
                Ok(state)
            }
            None => {
                let state = ClientState::first_run(
                    self.initial_version.clone(),
                    self.automatic_updates_supported,
                );
                self.repo.save(&state).await?;
                info!(
                    client_id = %state.client_id,
                    version = %state.current_version,
                    "Initialized client state"
                );
                Ok(state)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::ports::RepositoryError;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    /// In-memory client state repository.
    #[derive(Default)]
    pub struct MemoryStateRepo {
        state: StdMutex<Option<ClientState>>,
        saves: StdMutex<usize>,
        failing: StdMutex<bool>,
    }

    impl MemoryStateRepo {
        pub fn with_version(version: &str) -> Self {
            let repo = Self::default();
            *repo.state.lock().unwrap() = Some(ClientState {
                client_id: crate::domain::ClientId::from_stored("client_fixture"),
                current_version: version.to_string(),
                automatic_updates_supported: true,
            });
            repo
        }

        pub fn stored(&self) -> Option<ClientState> {
            self.state.lock().unwrap().clone()
        }

        pub fn save_count(&self) -> usize {
            *self.saves.lock().unwrap()
        }

        /// Make every later save fail with a storage error.
        pub fn fail_saves(&self) {
            *self.failing.lock().unwrap() = true;
        }
    }

    #[async_trait]
    impl ClientStateRepository for MemoryStateRepo {
        async fn load(&self) -> Result<Option<ClientState>, RepositoryError> {
            Ok(self.state.lock().unwrap().clone())
        }

        async fn save(&self, state: &ClientState) -> Result<(), RepositoryError> {
            if *self.failing.lock().unwrap() {
                return Err(RepositoryError::Storage("disk full".to_string()));
            }
            *self.state.lock().unwrap() = Some(state.clone());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }
}
