//! Canonical event union for everything the update flow surfaces to a presenter.
//!
//! Events are delivered through [`NotificationSinkPort`](crate::ports::NotificationSinkPort).
//! The core never renders anything itself.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag so non-Rust presenters can consume them:
//!
//! ```json
//! { "type": "notification_shown", "update": { "version": "1.4.0", ... } }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::UpdateRecord;

/// Static steps shown to the operator for a manual install.
pub const MANUAL_INSTALL_STEPS: [&str; 4] = [
    "Download the update package from the link above.",
    "Back up your current theme directory.",
    "Extract the package over the theme directory using your hosting file manager.",
    "Once the files are in place, mark the update as applied.",
];

/// Events emitted by the poller and resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateEvent {
    /// A newer update should be offered to the operator.
    NotificationShown {
        /// The update being offered.
        update: UpdateRecord,
    },

    /// The notification should be dismissed.
    NotificationHidden,

    /// The operator chose the manual path; show the package link and steps.
    ManualInstructions {
        version: String,
        #[serde(rename = "packageUrl")]
        package_url: String,
        steps: Vec<String>,
    },

    /// The remote endpoint applied the update.
    UpdateApplied {
        version: String,
        #[serde(rename = "filesUpdated")]
        files_updated: Option<u32>,
        #[serde(rename = "backupCreated")]
        backup_created: bool,
    },

    /// Automatic apply failed; the notification stays visible.
    ApplyFailed { version: String, error: String },

    /// The presenter should reload whatever it renders from the theme.
    ReloadRequested { version: String },
}

impl UpdateEvent {
    /// Create a manual-instructions event for `record`.
    pub fn manual_instructions(record: &UpdateRecord) -> Self {
        Self::ManualInstructions {
            version: record.version.clone(),
            package_url: record.package_url.clone(),
            steps: MANUAL_INSTALL_STEPS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Short machine name of the event, for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotificationShown { .. } => "notification_shown",
            Self::NotificationHidden => "notification_hidden",
            Self::ManualInstructions { .. } => "manual_instructions",
            Self::UpdateApplied { .. } => "update_applied",
            Self::ApplyFailed { .. } => "apply_failed",
            Self::ReloadRequested { .. } => "reload_requested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_event_wire_format() {
        let json = serde_json::to_value(UpdateEvent::NotificationHidden).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "notification_hidden" }));
    }

    #[test]
    fn test_apply_failed_wire_format() {
        let event = UpdateEvent::ApplyFailed {
            version: "1.2.0".to_string(),
            error: "disk full".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "apply_failed");
        assert_eq!(json["version"], "1.2.0");
        assert_eq!(event.name(), "apply_failed");
    }
}
