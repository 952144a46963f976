//! Command-line adapter for themeup.
//!
//! `main.rs` parses arguments and dispatches; the `bootstrap` module wires the
//! `SQLite` and HTTP adapters into an `UpdaterCore`; handlers print results.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliContext, bootstrap, load_settings};
pub use commands::{ApplyMode, Commands};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
pub use presentation::{OutputMode, TerminalSink};
