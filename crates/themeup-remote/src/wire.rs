//! Wire types for the registry, activity table and apply endpoint.
//!
//! Internal to `themeup-remote`; adapters convert to and from core types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use themeup_core::{ActivityLogEntry, ApplyOutcome, ApplyRequest, UpdateChannel, UpdateRecord};

use crate::error::{RemoteError, RemoteResult};

/// Registry ids may be serial integers or uuids.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// A row of the updates table.
#[derive(Debug, Clone, Deserialize)]
pub struct WireUpdateRecord {
    pub id: WireId,
    pub version: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub package_url: String,
    pub is_active: bool,
    #[serde(default)]
    pub channel: Option<String>,
    pub created_at: String,
}

impl WireUpdateRecord {
    pub fn into_domain(self) -> RemoteResult<UpdateRecord> {
        let created_at = parse_timestamp(&self.created_at)?;
        let channel = self
            .channel
            .as_deref()
            .and_then(|raw| raw.parse::<UpdateChannel>().ok())
            .unwrap_or_default();

        Ok(UpdateRecord {
            id: self.id.into_string(),
            version: self.version,
            title: self.title,
            description: self.description,
            package_url: self.package_url,
            is_active: self.is_active,
            channel,
            created_at,
        })
    }
}

/// Accepts `timestamptz` (RFC 3339) and zone-less `timestamp` columns; the
/// latter are read as UTC.
fn parse_timestamp(raw: &str) -> RemoteResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| RemoteError::InvalidResponse {
            message: format!("unparseable created_at: {raw:?}"),
        })
}

/// A row appended to the activity table.
#[derive(Debug, Serialize)]
pub struct WireActivityRow<'a> {
    pub client_id: &'a str,
    pub update_id: &'a str,
    pub version: &'a str,
    pub activity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    pub created_at: String,
}

impl<'a> From<&'a ActivityLogEntry> for WireActivityRow<'a> {
    fn from(entry: &'a ActivityLogEntry) -> Self {
        Self {
            client_id: entry.client_id.as_str(),
            update_id: &entry.update_id,
            version: &entry.version,
            activity: entry.activity.as_str(),
            message: entry.message.as_deref(),
            created_at: entry.timestamp.to_rfc3339(),
        }
    }
}

/// Body POSTed to the apply endpoint.
#[derive(Debug, Serialize)]
pub struct WireApplyRequest<'a> {
    pub api_key: &'a str,
    pub download_url: &'a str,
    pub version: &'a str,
    pub client_id: &'a str,
    pub create_backup: bool,
}

impl<'a> WireApplyRequest<'a> {
    pub fn new(api_key: &'a str, request: &'a ApplyRequest) -> Self {
        Self {
            api_key,
            download_url: &request.download_url,
            version: &request.version,
            client_id: request.client_id.as_str(),
            create_backup: request.create_backup,
        }
    }
}

/// Reply from the apply endpoint. Only `success` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct WireApplyResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub files_updated: Option<u32>,
    #[serde(default)]
    pub backup_created: bool,
}

impl From<WireApplyResponse> for ApplyOutcome {
    fn from(wire: WireApplyResponse) -> Self {
        Self {
            success: wire.success,
            message: wire.message,
            files_updated: wire.files_updated,
            backup_created: wire.backup_created,
        }
    }
}
