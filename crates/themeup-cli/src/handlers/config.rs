//! Config command handler.
//!
//! `show` prints the effective settings; `set` validates a value and
//! persists it into the `.env` file under the data root.

use anyhow::Result;

use themeup_core::paths::{env_file_path, persist_env_value};
use themeup_core::settings::{UpdaterSettings, env_keys, validate_settings};

use crate::bootstrap::load_settings;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;

/// Keys whose values are never printed.
const SECRET_KEYS: [&str; 2] = [env_keys::REGISTRY_KEY, env_keys::API_KEY];

/// Execute the config command.
///
/// `overrides` are the command-line settings flags; they show up in
/// `config show` but are never persisted.
pub fn execute(command: ConfigCommand, overrides: &[(&'static str, String)]) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            show(&load_settings(overrides)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(&key, &value),
    }
}

fn show(settings: &UpdaterSettings) {
    for key in env_keys::ALL {
        let value = effective_value(settings, key);
        let shown = match value {
            Some(v) if SECRET_KEYS.contains(&key) => mask(&v),
            Some(v) => v,
            None => "(not set)".to_string(),
        };
        println!("{key} = {shown}");
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let key = normalize_key(key)?;
    if key == env_keys::DATA_DIR {
        return Err(CliError::Arguments(format!(
            "{key} locates the .env file itself; export it in your shell instead"
        ))
        .into());
    }

    let candidate = UpdaterSettings::from_lookup(|k| {
        if k == key {
            Some(value.to_string())
        } else {
            std::env::var(k).ok()
        }
    })
    .map_err(|e| CliError::Config(e.to_string()))?;
    validate_settings(&candidate).map_err(|e| CliError::Config(e.to_string()))?;

    persist_env_value(key, value.trim()).map_err(CliError::from)?;
    println!("✓ {key} saved to {}", env_file_path()?.display());
    Ok(())
}

/// Resolve `channel`, `poll-interval-secs` or `THEMEUP_CHANNEL` to a known key.
pub fn normalize_key(raw: &str) -> Result<&'static str, CliError> {
    let upper = raw.trim().to_ascii_uppercase().replace('-', "_");
    let wanted = if upper.starts_with("THEMEUP_") {
        upper
    } else {
        format!("THEMEUP_{upper}")
    };
    env_keys::ALL
        .into_iter()
        .find(|k| *k == wanted)
        .ok_or_else(|| CliError::Arguments(format!("Unknown setting: {raw}")))
}

fn effective_value(settings: &UpdaterSettings, key: &str) -> Option<String> {
    match key {
        env_keys::DATA_DIR => std::env::var(key).ok().filter(|v| !v.is_empty()),
        env_keys::REGISTRY_URL => settings.registry_url.clone(),
        env_keys::REGISTRY_KEY => settings.registry_key.clone(),
        env_keys::UPDATES_TABLE => Some(settings.updates_table.clone()),
        env_keys::ACTIVITY_TABLE => Some(settings.activity_table.clone()),
        env_keys::APPLY_URL => settings.apply_url.clone(),
        env_keys::API_KEY => settings.api_key.clone(),
        env_keys::CHANNEL => Some(settings.channel.to_string()),
        env_keys::POLL_INTERVAL_SECS => Some(settings.poll_interval_secs.to_string()),
        env_keys::CREATE_BACKUP => Some(settings.create_backup.to_string()),
        env_keys::INITIAL_VERSION => Some(settings.initial_version.clone()),
        _ => None,
    }
}

/// Keep the first four characters of a secret.
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
