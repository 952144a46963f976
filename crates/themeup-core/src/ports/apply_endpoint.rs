//! Remote apply endpoint port.
//!
//! On shared hosting the client cannot replace theme files itself, so a
//! script on the host does it on request. From the client's point of view a
//! request is a single atomic remote operation; whether the remote side is
//! actually atomic is its own business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ClientId;

/// What the client asks the endpoint to install.
///
/// The endpoint's API key is adapter configuration and is added on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub download_url: String,
    pub version: String,
    pub client_id: ClientId,
    pub create_backup: bool,
}

/// What the endpoint reported.
///
/// `success` is the only field that decides the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub success: bool,
    pub message: Option<String>,
    pub files_updated: Option<u32>,
    pub backup_created: bool,
}

/// Errors talking to the apply endpoint.
///
/// A well-formed `success: false` reply is not an error at this level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Apply endpoint unreachable: {message}")]
    Network { message: String },

    #[error("Apply endpoint returned status {status}")]
    Status { status: u16 },

    #[error("Malformed apply response: {message}")]
    InvalidResponse { message: String },

    #[error("Apply endpoint misconfigured: {message}")]
    Configuration { message: String },
}

/// Client for the remote apply endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplyEndpointPort: Send + Sync {
    /// Send one apply request. No retries are made.
    async fn apply(&self, request: &ApplyRequest) -> Result<ApplyOutcome, ApplyError>;
}
