//! Check command handler.

use anyhow::Result;

use themeup_core::{PollOutcome, PollTrigger};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{OutputMode, display_update_summary};

/// Execute a forced check and print the outcome.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let outcome = ctx.core().poller().check(PollTrigger::Force).await;
    report(ctx.output(), &outcome)?;
    Ok(())
}

/// Print a check outcome. A failed check becomes a remote error.
pub fn report(output: OutputMode, outcome: &PollOutcome) -> Result<(), CliError> {
    match outcome {
        PollOutcome::Failed(error) => Err(CliError::Remote(error.clone())),
        // The sink already printed the notification event in JSON mode.
        PollOutcome::UpdateAvailable(record) => {
            if output == OutputMode::Text {
                display_update_summary(None, record);
            }
            Ok(())
        }
        other => {
            match output {
                OutputMode::Text => println!("{other}"),
                OutputMode::Json => {
                    println!("{}", serde_json::json!({ "outcome": other.to_string() }));
                }
            }
            Ok(())
        }
    }
}
