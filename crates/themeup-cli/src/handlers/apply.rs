//! Apply command handler.
//!
//! Runs a forced check so this process knows what is pending, then resolves
//! the notification the way the operator chose.

use anyhow::Result;

use themeup_core::{PollOutcome, PollTrigger};

use crate::bootstrap::CliContext;
use crate::commands::ApplyMode;
use crate::error::CliError;
use crate::handlers::check;
use crate::presentation::{OutputMode, display_instructions};

/// Execute the apply command.
pub async fn execute(ctx: &CliContext, mode: ApplyMode) -> Result<()> {
    let outcome = ctx.core().poller().check(PollTrigger::Force).await;
    if !matches!(outcome, PollOutcome::UpdateAvailable(_)) {
        check::report(ctx.output(), &outcome)?;
        if ctx.output() == OutputMode::Text {
            println!("Nothing to apply.");
        }
        return Ok(());
    }

    let resolver = ctx.core().resolver();
    match mode {
        ApplyMode::Automatic => {
            let applied = resolver.apply_automatic().await.map_err(CliError::from)?;
            if let Some(message) = applied.message.filter(|_| ctx.output() == OutputMode::Text) {
                println!("  {message}");
            }
        }
        ApplyMode::Manual => {
            let instructions = resolver.apply_manual().await.map_err(CliError::from)?;
            if ctx.output() == OutputMode::Text {
                display_instructions(&instructions);
                println!();
                println!("Run `themeup apply --mark-applied` once the files are in place.");
            }
        }
        ApplyMode::MarkApplied => {
            let record = resolver.mark_applied().await.map_err(CliError::from)?;
            if ctx.output() == OutputMode::Text {
                println!("✓ Version {} marked as applied (not verified)", record.version);
            }
        }
    }
    Ok(())
}
