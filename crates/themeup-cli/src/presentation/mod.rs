//! Shared CLI presentation utilities.
//!
//! Format-only: handlers decide what to show, this module decides how.

pub mod sink;
pub mod tables;
pub mod update_display;

pub use sink::{OutputMode, TerminalSink};
pub use tables::{format_optional, print_separator, truncate_string};
pub use update_display::{display_instructions, display_update_summary};
