//! Commands enum and per-command arguments.

use clap::{Args, Subcommand};

use crate::config_commands::ConfigCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show client id, installed version and update configuration
    Status,

    /// Check the registry now and show any pending update
    Check,

    /// Keep polling the registry (SIGHUP forces a check, Ctrl+C stops)
    Watch,

    /// Check the registry, then resolve the pending update
    Apply(ApplyArgs),

    /// Show the local activity journal
    Activity {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Show resolved paths for themeup data
    Paths,

    /// View or change persisted configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// How to resolve the pending update.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ApplyArgs {
    /// Ask the remote apply endpoint to install the update
    #[arg(long)]
    pub auto: bool,

    /// Show the package link and manual install steps
    #[arg(long)]
    pub manual: bool,

    /// Record the update as installed without verification
    #[arg(long = "mark-applied")]
    pub mark_applied: bool,
}

/// Resolution chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Automatic,
    Manual,
    MarkApplied,
}

impl ApplyArgs {
    pub const fn mode(&self) -> ApplyMode {
        if self.auto {
            ApplyMode::Automatic
        } else if self.manual {
            ApplyMode::Manual
        } else {
            ApplyMode::MarkApplied
        }
    }
}
