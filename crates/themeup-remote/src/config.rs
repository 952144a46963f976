//! Public configuration for the remote adapters.

use std::time::Duration;

use themeup_core::UpdaterSettings;

/// Configuration shared by the registry, activity and apply clients.
///
/// # Example
///
/// ```
/// use themeup_remote::RemoteClientConfig;
/// use std::time::Duration;
///
/// let config = RemoteClientConfig::new()
///     .with_registry("https://xyz.supabase.co", Some("anon-key".to_string()))
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct RemoteClientConfig {
    /// Base URL of the registry (PostgREST lives under `/rest/v1`)
    pub(crate) registry_url: Option<String>,
    /// Key sent as `apikey` and bearer token
    pub(crate) registry_key: Option<String>,
    pub(crate) updates_table: String,
    pub(crate) activity_table: String,
    /// Apply endpoint URL
    pub(crate) apply_url: Option<String>,
    /// Key sent in the apply request body
    pub(crate) api_key: Option<String>,
    pub(crate) user_agent: String,
    /// Timeout for registry and activity requests
    pub(crate) timeout: Duration,
    /// Timeout for apply requests; the host downloads and unpacks the
    /// package before answering
    pub(crate) apply_timeout: Duration,
}

impl Default for RemoteClientConfig {
    fn default() -> Self {
        Self {
            registry_url: None,
            registry_key: None,
            updates_table: themeup_core::settings::DEFAULT_UPDATES_TABLE.to_string(),
            activity_table: themeup_core::settings::DEFAULT_ACTIVITY_TABLE.to_string(),
            apply_url: None,
            api_key: None,
            user_agent: concat!("themeup/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            apply_timeout: Duration::from_secs(120),
        }
    }
}

impl RemoteClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from validated updater settings.
    #[must_use]
    pub fn from_settings(settings: &UpdaterSettings) -> Self {
        Self {
            registry_url: settings.registry_url.clone(),
            registry_key: settings.registry_key.clone(),
            updates_table: settings.updates_table.clone(),
            activity_table: settings.activity_table.clone(),
            apply_url: settings.apply_url.clone(),
            api_key: settings.api_key.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_registry(mut self, url: impl Into<String>, key: Option<String>) -> Self {
        self.registry_url = Some(url.into());
        self.registry_key = key;
        self
    }

    #[must_use]
    pub fn with_tables(
        mut self,
        updates_table: impl Into<String>,
        activity_table: impl Into<String>,
    ) -> Self {
        self.updates_table = updates_table.into();
        self.activity_table = activity_table.into();
        self
    }

    #[must_use]
    pub fn with_apply_endpoint(mut self, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.apply_url = Some(url.into());
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults to 120 seconds.
    #[must_use]
    pub const fn with_apply_timeout(mut self, timeout: Duration) -> Self {
        self.apply_timeout = timeout;
        self
    }

    pub const fn has_registry(&self) -> bool {
        self.registry_url.is_some()
    }

    pub const fn has_apply_endpoint(&self) -> bool {
        self.apply_url.is_some() && self.api_key.is_some()
    }
}
