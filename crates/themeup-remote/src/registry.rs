//! PostgREST-backed implementation of `UpdateRegistryPort`.

use async_trait::async_trait;
use themeup_core::{RegistryError, UpdateChannel, UpdateRecord, UpdateRegistryPort};
use tracing::debug;

use crate::config::RemoteClientConfig;
use crate::endpoints::{auth_headers, latest_active_url};
use crate::error::{RemoteError, RemoteResult, to_registry_error};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::wire::WireUpdateRecord;

/// Registry client using the reqwest backend.
pub type DefaultUpdateRegistry = RestUpdateRegistry<ReqwestBackend>;

/// Reads the newest active update from the registry table.
pub struct RestUpdateRegistry<B: HttpBackend> {
    backend: B,
    base_url: String,
    table: String,
    headers: Vec<(&'static str, String)>,
}

impl DefaultUpdateRegistry {
    /// Create a registry client. Fails if no registry URL is configured.
    pub fn new(config: &RemoteClientConfig) -> RemoteResult<Self> {
        Self::with_backend(config, ReqwestBackend::new(config)?)
    }
}

impl<B: HttpBackend> RestUpdateRegistry<B> {
    pub(crate) fn with_backend(config: &RemoteClientConfig, backend: B) -> RemoteResult<Self> {
        let base_url = config
            .registry_url
            .clone()
            .ok_or(RemoteError::NotConfigured {
                what: "Registry URL",
            })?;
        // Fail on a malformed URL here rather than on every poll.
        latest_active_url(&base_url, &config.updates_table, UpdateChannel::Stable)?;

        Ok(Self {
            backend,
            base_url,
            table: config.updates_table.clone(),
            headers: auth_headers(config.registry_key.as_deref()),
        })
    }

    async fn fetch_latest(&self, channel: UpdateChannel) -> RemoteResult<Option<UpdateRecord>> {
        let url = latest_active_url(&self.base_url, &self.table, channel)?;
        let rows: Vec<WireUpdateRecord> = self.backend.get_json(&url, &self.headers).await?;
        debug!(rows = rows.len(), %channel, "Fetched latest active update");

        rows.into_iter()
            .next()
            .map(WireUpdateRecord::into_domain)
            .transpose()
    }
}

#[async_trait]
impl<B: HttpBackend> UpdateRegistryPort for RestUpdateRegistry<B> {
    async fn latest_active(
        &self,
        channel: UpdateChannel,
    ) -> Result<Option<UpdateRecord>, RegistryError> {
        self.fetch_latest(channel).await.map_err(to_registry_error)
    }
}
