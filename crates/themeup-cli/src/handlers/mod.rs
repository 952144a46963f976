//! Command handlers that delegate to `UpdaterCore`.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that call core services and format the result
//!
//! `paths` and `config` run without a context so they work before the
//! database or registry are usable.

pub mod activity;
pub mod apply;
pub mod check;
pub mod config;
pub mod paths;
pub mod status;
pub mod watch;
