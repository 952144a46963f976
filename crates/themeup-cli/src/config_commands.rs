//! Configuration subcommands.

use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked)
    Show,
    /// Persist a setting into the data-root .env file
    Set {
        /// Setting name, e.g. THEMEUP_CHANNEL or channel
        key: String,
        /// New value
        value: String,
    },
}
