//! Terminal presenter for update events.

use themeup_core::{NotificationSinkPort, UpdateEvent};
use tracing::warn;

/// How events and results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Prints update events as they happen.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink {
    mode: OutputMode,
}

impl TerminalSink {
    pub const fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Render an event as a text line, or `None` for events printed elsewhere.
    pub fn render_text(event: &UpdateEvent) -> Option<String> {
        match event {
            UpdateEvent::NotificationShown { update } => Some(format!(
                "🔔 Update {} available: {}",
                update.version, update.title
            )),
            UpdateEvent::NotificationHidden => Some("Notification dismissed".to_string()),
            // Handlers print the full instructions.
            UpdateEvent::ManualInstructions { .. } => None,
            UpdateEvent::UpdateApplied {
                version,
                files_updated,
                backup_created,
            } => {
                let files = files_updated.map_or_else(String::new, |n| format!(", {n} files"));
                let backup = if *backup_created { ", backup created" } else { "" };
                Some(format!("✓ Update {version} applied{files}{backup}"))
            }
            UpdateEvent::ApplyFailed { version, error } => {
                Some(format!("✗ Update {version} failed: {error}"))
            }
            UpdateEvent::ReloadRequested { version } => {
                Some(format!("Theme {version} is live; reload any open pages"))
            }
        }
    }
}

impl NotificationSinkPort for TerminalSink {
    fn emit(&self, event: UpdateEvent) {
        match self.mode {
            OutputMode::Text => {
                if let Some(line) = Self::render_text(&event) {
                    println!("{line}");
                }
            }
            OutputMode::Json => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(event = event.name(), error = %e, "Failed to encode event"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applied_line_includes_details() {
        let line = TerminalSink::render_text(&UpdateEvent::UpdateApplied {
            version: "1.3.0".to_string(),
            files_updated: Some(12),
            backup_created: true,
        });
        assert_eq!(
            line.as_deref(),
            Some("✓ Update 1.3.0 applied, 12 files, backup created")
        );
    }

    #[test]
    fn test_manual_instructions_left_to_handler() {
        let event = UpdateEvent::ManualInstructions {
            version: "1.3.0".to_string(),
            package_url: "https://cdn.example.com/1.3.0.zip".to_string(),
            steps: vec![],
        };
        assert!(TerminalSink::render_text(&event).is_none());
    }
}
