//! Activity command handler.
//!
//! Reads back the local journal. The remote activity table is write-only
//! from the client's side.

use anyhow::Result;

use themeup_core::ActivityLogEntry;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{OutputMode, format_optional, print_separator, truncate_string};

const TABLE_WIDTH: usize = 92;

/// Execute the activity command.
pub async fn execute(ctx: &CliContext, limit: u32) -> Result<()> {
    let entries = ctx
        .journal()
        .recent(limit)
        .await
        .map_err(|e| CliError::Database(e.to_string()))?;

    if ctx.output() == OutputMode::Json {
        for entry in &entries {
            println!("{}", serde_json::to_string(entry)?);
        }
        return Ok(());
    }

    if entries.is_empty() {
        println!("No update activity recorded yet.");
        return Ok(());
    }

    println!(
        "{:<20} {:<16} {:<10} {}",
        "TIME (UTC)", "ACTIVITY", "VERSION", "MESSAGE"
    );
    print_separator(TABLE_WIDTH);
    for entry in &entries {
        println!("{}", format_row(entry));
    }
    Ok(())
}

fn format_row(entry: &ActivityLogEntry) -> String {
    format!(
        "{:<20} {:<16} {:<10} {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        entry.activity.as_str(),
        truncate_string(&entry.version, 10),
        truncate_string(&format_optional(entry.message.as_ref(), "-"), 44),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use themeup_core::{ActivityKind, ClientId};

    #[test]
    fn test_row_layout() {
        let entry = ActivityLogEntry {
            client_id: ClientId::from_stored("client-1"),
            update_id: "7".to_string(),
            version: "1.4.0".to_string(),
            activity: ActivityKind::MarkedApplied,
            message: None,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        };
        let row = format_row(&entry);
        assert!(row.starts_with("2024-03-01 09:30:00  marked_applied"));
        assert!(row.ends_with(" -"));
    }
}
