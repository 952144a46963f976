//! Activity log entries.
//!
//! Entries are written for audit only. The client never reads remote entries
//! back; the local journal exists so operators can inspect what happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::client::ClientId;
use super::update::UpdateRecord;

/// What happened to an update on this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A newer update was surfaced to the operator.
    Notified,
    /// An automatic apply request is about to be sent.
    Started,
    /// The apply endpoint reported success.
    Completed,
    /// The apply request failed or was rejected.
    Failed,
    /// The operator chose to download and install by hand.
    ManualDownload,
    /// The operator declared the update installed without verification.
    MarkedApplied,
}

impl ActivityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notified => "notified",
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::ManualDownload => "manual_download",
            Self::MarkedApplied => "marked_applied",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notified" => Ok(Self::Notified),
            "started" => Ok(Self::Started),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "manual_download" => Ok(Self::ManualDownload),
            "marked_applied" => Ok(Self::MarkedApplied),
            other => Err(format!("Unknown activity kind: {other}")),
        }
    }
}

/// A single append-only audit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub client_id: ClientId,
    pub update_id: String,
    pub version: String,
    pub activity: ActivityKind,
    /// Free-form detail (error text, endpoint message).
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Build an entry for `record`, stamped with the current time.
    pub fn for_update(client_id: &ClientId, record: &UpdateRecord, activity: ActivityKind) -> Self {
        Self {
            client_id: client_id.clone(),
            update_id: record.id.clone(),
            version: record.version.clone(),
            activity,
            message: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names_parse_back() {
        for kind in [
            ActivityKind::Notified,
            ActivityKind::Started,
            ActivityKind::Completed,
            ActivityKind::Failed,
            ActivityKind::ManualDownload,
            ActivityKind::MarkedApplied,
        ] {
            assert_eq!(kind.as_str().parse::<ActivityKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ActivityKind::MarkedApplied).unwrap();
        assert_eq!(json, "\"marked_applied\"");
    }
}
