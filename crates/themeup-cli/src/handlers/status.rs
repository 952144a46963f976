//! Status command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::OutputMode;

/// Execute the status command.
///
/// Loads (or on first run creates) the client state and prints it with the
/// update configuration in effect.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let state = ctx.core().state().current().await.map_err(CliError::from)?;
    let settings = ctx.settings();

    if ctx.output() == OutputMode::Json {
        let json = serde_json::json!({
            "clientId": state.client_id.as_str(),
            "currentVersion": state.current_version,
            "automaticUpdatesSupported": state.automatic_updates_supported,
            "channel": settings.channel.as_str(),
            "registryConfigured": ctx.registry_configured(),
            "pollIntervalSecs": settings.poll_interval_secs,
        });
        println!("{json}");
        return Ok(());
    }

    println!("Client ID:         {}", state.client_id.as_str());
    println!("Installed version: {}", state.current_version);
    println!("Channel:           {}", settings.channel);
    println!(
        "Automatic updates: {}",
        if state.automatic_updates_supported {
            "supported"
        } else {
            "not supported (manual only)"
        }
    );
    println!(
        "Registry:          {}",
        settings
            .registry_url
            .as_deref()
            .unwrap_or("not configured")
    );
    println!("Poll interval:     {}s", settings.poll_interval_secs);
    Ok(())
}
