//! Root CLI structure and global options.

use clap::Parser;

use crate::commands::Commands;
use crate::presentation::OutputMode;
use themeup_core::settings::env_keys;

/// Theme update agent: watches the update registry and applies theme updates.
#[derive(Parser)]
#[command(name = "themeup")]
#[command(about = "Check for, and apply, theme updates")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Print events as JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Release channel to follow for this invocation (stable, beta, alpha)
    #[arg(long, global = true)]
    pub channel: Option<String>,

    /// Registry base URL for this invocation
    #[arg(long = "registry-url", global = true)]
    pub registry_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    /// Settings overrides given on the command line, keyed like the
    /// environment.
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(channel) = &self.channel {
            overrides.push((env_keys::CHANNEL, channel.clone()));
        }
        if let Some(url) = &self.registry_url {
            overrides.push((env_keys::REGISTRY_URL, url.clone()));
        }
        overrides
    }
}
