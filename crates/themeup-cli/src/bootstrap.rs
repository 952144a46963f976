//! CLI bootstrap - the composition root.
//!
//! The only place where infrastructure is wired together for the CLI:
//! - `SQLite` pool, client state and local journal (via themeup-db)
//! - Registry, remote activity table and apply endpoint (via themeup-remote)
//! - Terminal notification sink
//!
//! Command handlers receive the composed `UpdaterCore`.

use std::sync::Arc;

use anyhow::Result;
use themeup_core::paths::database_path;
use themeup_core::ports::{
    ActivityLogPort, ApplyEndpointPort, CompositeActivityLog, UnconfiguredRegistry,
    UpdateRegistryPort, UpdaterPorts,
};
use themeup_core::services::UpdaterCore;
use themeup_core::settings::{UpdaterSettings, validate_settings};
use themeup_db::{CoreFactory, SqliteActivityLog, setup_database};
use themeup_remote::{
    DefaultActivityLog, DefaultApplyClient, DefaultUpdateRegistry, RemoteClientConfig,
};
use tracing::{debug, warn};

use crate::error::CliError;
use crate::presentation::{OutputMode, TerminalSink};

/// Fully composed context for CLI commands.
pub struct CliContext {
    core: UpdaterCore,
    settings: UpdaterSettings,
    journal: Arc<SqliteActivityLog>,
    registry_configured: bool,
    output: OutputMode,
}

impl CliContext {
    pub const fn core(&self) -> &UpdaterCore {
        &self.core
    }

    pub const fn settings(&self) -> &UpdaterSettings {
        &self.settings
    }

    /// The local activity journal, for reading back history.
    pub fn journal(&self) -> &SqliteActivityLog {
        &self.journal
    }

    pub const fn registry_configured(&self) -> bool {
        self.registry_configured
    }

    pub const fn output(&self) -> OutputMode {
        self.output
    }
}

/// Build settings from the environment with command-line overrides on top.
pub fn load_settings(overrides: &[(&'static str, String)]) -> Result<UpdaterSettings, CliError> {
    let settings = UpdaterSettings::from_lookup(|key| {
        overrides
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .or_else(|| std::env::var(key).ok())
    })
    .map_err(|e| CliError::Config(e.to_string()))?;

    validate_settings(&settings).map_err(|e| CliError::Config(e.to_string()))?;
    Ok(settings)
}

/// Bootstrap the CLI with all dependencies wired.
pub async fn bootstrap(settings: UpdaterSettings, output: OutputMode) -> Result<CliContext> {
    let db_path = database_path()?;
    debug!(path = %db_path.display(), "Opening state database");
    let pool = setup_database(&db_path)
        .await
        .map_err(|e| CliError::Database(format!("{e:#}")))?;

    let state = CoreFactory::client_state_repository(pool.clone());
    let journal = CoreFactory::activity_log(pool);

    let remote = RemoteClientConfig::from_settings(&settings);
    let registry_configured = remote.has_registry();

    let mut activity = CompositeActivityLog::new(vec![
        Arc::clone(&journal) as Arc<dyn ActivityLogPort>,
    ]);

    let registry: Arc<dyn UpdateRegistryPort> = if registry_configured {
        let registry =
            DefaultUpdateRegistry::new(&remote).map_err(|e| CliError::Config(e.to_string()))?;
        let remote_log =
            DefaultActivityLog::new(&remote).map_err(|e| CliError::Config(e.to_string()))?;
        activity = activity.with(Arc::new(remote_log));
        Arc::new(registry)
    } else {
        warn!("No registry URL configured; update checks will fail");
        Arc::new(UnconfiguredRegistry)
    };

    let apply: Option<Arc<dyn ApplyEndpointPort>> = if remote.has_apply_endpoint() {
        let client =
            DefaultApplyClient::new(&remote).map_err(|e| CliError::Config(e.to_string()))?;
        Some(Arc::new(client))
    } else {
        debug!("No apply endpoint configured; only manual updates are available");
        None
    };

    let ports = UpdaterPorts {
        registry,
        apply,
        state,
        activity: Arc::new(activity),
        sink: Arc::new(TerminalSink::new(output)),
    };
    let core = UpdaterCore::new(ports, &settings);

    Ok(CliContext {
        core,
        settings,
        journal,
        registry_configured,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_defaults() {
        let settings = load_settings(&[
            ("THEMEUP_CHANNEL", "alpha".to_string()),
            ("THEMEUP_POLL_INTERVAL_SECS", "600".to_string()),
        ])
        .unwrap();
        assert_eq!(settings.channel.as_str(), "alpha");
        assert_eq!(settings.poll_interval_secs, 600);
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let err = load_settings(&[("THEMEUP_CHANNEL", "nightly".to_string())]).unwrap_err();
        assert_eq!(err.exit_code(), 78);

        let err = load_settings(&[("THEMEUP_POLL_INTERVAL_SECS", "5".to_string())]).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
