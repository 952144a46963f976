//! Updater settings and validation.
//!
//! Settings come from environment variables (the CLI loads `.env` files first
//! and lets flags override individual values). These are pure domain types
//! with no infrastructure dependencies.

use std::time::Duration;

use crate::domain::UpdateChannel;
use crate::version;

/// Default registry table holding update records.
pub const DEFAULT_UPDATES_TABLE: &str = "theme_updates";

/// Default registry table receiving activity rows.
pub const DEFAULT_ACTIVITY_TABLE: &str = "update_activity";

/// Default poll interval: six hours.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 6 * 60 * 60;

/// Smallest poll interval accepted, to keep clients from hammering the registry.
pub const MIN_POLL_INTERVAL_SECS: u64 = 60;

/// Version assumed on first run when nothing is stored yet.
pub const DEFAULT_INITIAL_VERSION: &str = "1.0.0";

/// Environment variable names.
pub mod env_keys {
    pub const DATA_DIR: &str = "THEMEUP_DATA_DIR";
    pub const REGISTRY_URL: &str = "THEMEUP_REGISTRY_URL";
    pub const REGISTRY_KEY: &str = "THEMEUP_REGISTRY_KEY";
    pub const UPDATES_TABLE: &str = "THEMEUP_UPDATES_TABLE";
    pub const ACTIVITY_TABLE: &str = "THEMEUP_ACTIVITY_TABLE";
    pub const APPLY_URL: &str = "THEMEUP_APPLY_URL";
    pub const API_KEY: &str = "THEMEUP_API_KEY";
    pub const CHANNEL: &str = "THEMEUP_CHANNEL";
    pub const POLL_INTERVAL_SECS: &str = "THEMEUP_POLL_INTERVAL_SECS";
    pub const CREATE_BACKUP: &str = "THEMEUP_CREATE_BACKUP";
    pub const INITIAL_VERSION: &str = "THEMEUP_INITIAL_VERSION";

    /// Every key `config set` accepts.
    pub const ALL: [&str; 11] = [
        DATA_DIR,
        REGISTRY_URL,
        REGISTRY_KEY,
        UPDATES_TABLE,
        ACTIVITY_TABLE,
        APPLY_URL,
        API_KEY,
        CHANNEL,
        POLL_INTERVAL_SECS,
        CREATE_BACKUP,
        INITIAL_VERSION,
    ];
}

/// Settings for one updater client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterSettings {
    /// Base URL of the update registry (e.g. `https://xyz.supabase.co`).
    pub registry_url: Option<String>,
    /// Anonymous API key for the registry.
    pub registry_key: Option<String>,
    pub updates_table: String,
    pub activity_table: String,
    /// Remote apply endpoint. Without it only manual updates are possible.
    pub apply_url: Option<String>,
    /// API key sent to the apply endpoint.
    pub api_key: Option<String>,
    pub channel: UpdateChannel,
    pub poll_interval_secs: u64,
    /// Ask the apply endpoint to back up files before replacing them.
    pub create_backup: bool,
    pub initial_version: String,
}

impl Default for UpdaterSettings {
    fn default() -> Self {
        Self {
            registry_url: None,
            registry_key: None,
            updates_table: DEFAULT_UPDATES_TABLE.to_string(),
            activity_table: DEFAULT_ACTIVITY_TABLE.to_string(),
            apply_url: None,
            api_key: None,
            channel: UpdateChannel::Stable,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            create_backup: true,
            initial_version: DEFAULT_INITIAL_VERSION.to_string(),
        }
    }
}

impl UpdaterSettings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup.
    ///
    /// Unset or blank keys fall back to defaults; keys that are set but
    /// unparseable are an error rather than a silent default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let channel = match get(env_keys::CHANNEL) {
            Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidValue {
                key: env_keys::CHANNEL,
                value: raw,
            })?,
            None => defaults.channel,
        };

        let poll_interval_secs = match get(env_keys::POLL_INTERVAL_SECS) {
            Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidValue {
                key: env_keys::POLL_INTERVAL_SECS,
                value: raw,
            })?,
            None => defaults.poll_interval_secs,
        };

        let create_backup = match get(env_keys::CREATE_BACKUP) {
            Some(raw) => parse_bool(&raw).ok_or(SettingsError::InvalidValue {
                key: env_keys::CREATE_BACKUP,
                value: raw,
            })?,
            None => defaults.create_backup,
        };

        Ok(Self {
            registry_url: get(env_keys::REGISTRY_URL),
            registry_key: get(env_keys::REGISTRY_KEY),
            updates_table: get(env_keys::UPDATES_TABLE).unwrap_or(defaults.updates_table),
            activity_table: get(env_keys::ACTIVITY_TABLE).unwrap_or(defaults.activity_table),
            apply_url: get(env_keys::APPLY_URL),
            api_key: get(env_keys::API_KEY),
            channel,
            poll_interval_secs,
            create_backup,
            initial_version: get(env_keys::INITIAL_VERSION).unwrap_or(defaults.initial_version),
        })
    }

    /// Automatic apply needs both an endpoint and a key.
    pub const fn automatic_updates_supported(&self) -> bool {
        self.apply_url.is_some() && self.api_key.is_some()
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Poll interval must be at least {MIN_POLL_INTERVAL_SECS} seconds, got {0}")]
    PollIntervalTooShort(u64),

    #[error("{key} must be an http(s) URL, got {value:?}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("Initial version must be dotted numeric (e.g. 1.0.0), got {0:?}")]
    InvalidInitialVersion(String),

    #[error("Table name cannot be empty")]
    EmptyTableName,

    #[error("{0} is set but {1} is missing")]
    MissingCompanion(&'static str, &'static str),
}

/// Validate settings values.
pub fn validate_settings(settings: &UpdaterSettings) -> Result<(), SettingsError> {
    if settings.poll_interval_secs < MIN_POLL_INTERVAL_SECS {
        return Err(SettingsError::PollIntervalTooShort(
            settings.poll_interval_secs,
        ));
    }

    if let Some(url) = &settings.registry_url {
        if !is_http_url(url) {
            return Err(SettingsError::InvalidUrl {
                key: env_keys::REGISTRY_URL,
                value: url.clone(),
            });
        }
    }

    if let Some(url) = &settings.apply_url {
        if !is_http_url(url) {
            return Err(SettingsError::InvalidUrl {
                key: env_keys::APPLY_URL,
                value: url.clone(),
            });
        }
        if settings.api_key.is_none() {
            return Err(SettingsError::MissingCompanion(
                env_keys::APPLY_URL,
                env_keys::API_KEY,
            ));
        }
    }

    if settings.updates_table.trim().is_empty() || settings.activity_table.trim().is_empty() {
        return Err(SettingsError::EmptyTableName);
    }

    if !version::is_well_formed(&settings.initial_version) {
        return Err(SettingsError::InvalidInitialVersion(
            settings.initial_version.clone(),
        ));
    }

    Ok(())
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}
