//! Paths command handler.
//!
//! Displays all resolved paths for diagnosing data-root issues.

use anyhow::Result;

use themeup_core::paths::ResolvedPaths;

/// Execute the paths command, printing `key = value` lines.
pub fn execute() -> Result<()> {
    let paths = ResolvedPaths::resolve()?;
    println!("{paths}");
    Ok(())
}
