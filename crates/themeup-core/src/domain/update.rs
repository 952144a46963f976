//! Update record and release channel types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::version;

/// A named release track used to filter which record is considered current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateChannel {
    #[default]
    Stable,
    Beta,
    Alpha,
}

impl UpdateChannel {
    /// Wire name of the channel as stored in the registry.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Beta => "beta",
            Self::Alpha => "alpha",
        }
    }
}

impl fmt::Display for UpdateChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stable" | "release" => Ok(Self::Stable),
            "beta" => Ok(Self::Beta),
            "alpha" => Ok(Self::Alpha),
            other => Err(format!("Unknown update channel: {other}")),
        }
    }
}

/// A theme update published by the remote registry.
///
/// Owned by the registry; the client never writes these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Registry identifier of the record.
    pub id: String,
    /// Dotted-numeric version string (e.g. `1.4.0`).
    pub version: String,
    /// Short human-readable title.
    pub title: String,
    /// Release notes.
    pub description: Option<String>,
    /// URL of the downloadable update package.
    pub package_url: String,
    /// Whether the registry currently offers this record.
    pub is_active: bool,
    /// Release channel the record belongs to.
    #[serde(default)]
    pub channel: UpdateChannel,
    /// When the record was published.
    pub created_at: DateTime<Utc>,
}

impl UpdateRecord {
    /// Returns `true` if this record is strictly newer than `current_version`.
    pub fn is_newer_than(&self, current_version: &str) -> bool {
        version::is_newer(&self.version, current_version)
    }

    /// Two records describe the same notification if id and version match.
    pub fn same_release(&self, other: &Self) -> bool {
        self.id == other.id && self.version == other.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, version: &str) -> UpdateRecord {
        UpdateRecord {
            id: id.to_string(),
            version: version.to_string(),
            title: "Spring refresh".to_string(),
            description: None,
            package_url: "https://cdn.example.com/theme.zip".to_string(),
            is_active: true,
            channel: UpdateChannel::Stable,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_channel_round_trip_from_str() {
        assert_eq!("beta".parse::<UpdateChannel>(), Ok(UpdateChannel::Beta));
        assert_eq!("ALPHA".parse::<UpdateChannel>(), Ok(UpdateChannel::Alpha));
        assert_eq!("release".parse::<UpdateChannel>(), Ok(UpdateChannel::Stable));
        assert!("nightly".parse::<UpdateChannel>().is_err());
    }

    #[test]
    fn test_channel_defaults_to_stable_when_missing() {
        let json = serde_json::json!({
            "id": "7",
            "version": "1.1.0",
            "title": "t",
            "description": null,
            "package_url": "https://x/y.zip",
            "is_active": true,
            "created_at": "2024-05-01T10:00:00Z"
        });
        let parsed: UpdateRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.channel, UpdateChannel::Stable);
    }

    #[test]
    fn test_is_newer_than() {
        let r = record("1", "1.3.0");
        assert!(r.is_newer_than("1.2.9"));
        assert!(!r.is_newer_than("1.3"));
    }

    #[test]
    fn test_same_release_ignores_metadata() {
        let a = record("1", "1.3.0");
        let mut b = record("1", "1.3.0");
        b.title = "Renamed".to_string();
        assert!(a.same_release(&b));
        assert!(!a.same_release(&record("2", "1.3.0")));
    }
}
