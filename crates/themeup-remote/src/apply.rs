//! HTTP client for the remote apply endpoint.

use async_trait::async_trait;
use themeup_core::{ApplyEndpointPort, ApplyError, ApplyOutcome, ApplyRequest};
use tracing::{debug, warn};
use url::Url;

use crate::config::RemoteClientConfig;
use crate::error::{RemoteError, RemoteResult, to_apply_error};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::wire::{WireApplyRequest, WireApplyResponse};

/// Apply client using the reqwest backend.
pub type DefaultApplyClient = RemoteApplyClient<ReqwestBackend>;

/// Sends one apply request per call. Never retries.
pub struct RemoteApplyClient<B: HttpBackend> {
    backend: B,
    url: Url,
    api_key: String,
}

impl DefaultApplyClient {
    /// Create an apply client. Fails unless both URL and API key are set.
    pub fn new(config: &RemoteClientConfig) -> RemoteResult<Self> {
        Self::with_backend(config, ReqwestBackend::for_apply(config)?)
    }
}

impl<B: HttpBackend> RemoteApplyClient<B> {
    pub(crate) fn with_backend(config: &RemoteClientConfig, backend: B) -> RemoteResult<Self> {
        let url = config
            .apply_url
            .as_deref()
            .ok_or(RemoteError::NotConfigured { what: "Apply URL" })?;
        let api_key = config
            .api_key
            .clone()
            .ok_or(RemoteError::NotConfigured {
                what: "Apply API key",
            })?;

        Ok(Self {
            backend,
            url: Url::parse(url)?,
            api_key,
        })
    }

    async fn send(&self, request: &ApplyRequest) -> RemoteResult<ApplyOutcome> {
        let body = WireApplyRequest::new(&self.api_key, request);
        debug!(url = %self.url, version = %request.version, "Sending apply request");

        let reply: RemoteResult<WireApplyResponse> =
            self.backend.post_json(&self.url, &[], &body).await;
        match reply {
            Ok(reply) => Ok(reply.into()),
            // The endpoint reports its own failures as JSON with an error status.
            Err(RemoteError::RequestFailed {
                status,
                url,
                body: Some(text),
            }) => match serde_json::from_str::<WireApplyResponse>(&text) {
                Ok(reply) => {
                    warn!(status, "Apply endpoint answered with an error status");
                    Ok(reply.into())
                }
                Err(_) => Err(RemoteError::RequestFailed {
                    status,
                    url,
                    body: Some(text),
                }),
            },
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<B: HttpBackend> ApplyEndpointPort for RemoteApplyClient<B> {
    async fn apply(&self, request: &ApplyRequest) -> Result<ApplyOutcome, ApplyError> {
        self.send(request).await.map_err(to_apply_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use serde_json::json;
    use themeup_core::ClientId;

    fn config() -> RemoteClientConfig {
        RemoteClientConfig::new()
            .with_apply_endpoint("https://site.example.com/apply-update.php", "s3cret")
    }

    fn request() -> ApplyRequest {
        ApplyRequest {
            download_url: "https://cdn.example.com/theme-1.4.0.zip".to_string(),
            version: "1.4.0".to_string(),
            client_id: ClientId::from_stored("client_abc"),
            create_backup: true,
        }
    }

    #[tokio::test]
    async fn test_apply_sends_key_in_body_and_maps_reply() {
        let backend = FakeBackend::new().with_response(
            "apply-update.php",
            CannedResponse::Json(json!({
                "success": true,
                "message": "Updated",
                "files_updated": 14,
                "backup_created": true
            })),
        );
        let client = RemoteApplyClient::with_backend(&config(), backend).unwrap();

        let outcome = client.apply(&request()).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.files_updated, Some(14));
        let requests = client.backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            Some(json!({
                "api_key": "s3cret",
                "download_url": "https://cdn.example.com/theme-1.4.0.zip",
                "version": "1.4.0",
                "client_id": "client_abc",
                "create_backup": true
            }))
        );
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_is_logical_failure() {
        let backend = FakeBackend::new().with_response(
            "apply-update.php",
            CannedResponse::Status {
                status: 403,
                body: Some(r#"{"success": false, "message": "Invalid API key"}"#.to_string()),
            },
        );
        let client = RemoteApplyClient::with_backend(&config(), backend).unwrap();

        let outcome = client.apply(&request()).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Invalid API key"));
    }

    #[tokio::test]
    async fn test_error_status_without_json_is_status_error() {
        let backend = FakeBackend::new().with_response(
            "apply-update.php",
            CannedResponse::Status {
                status: 502,
                body: Some("<html>Bad Gateway</html>".to_string()),
            },
        );
        let client = RemoteApplyClient::with_backend(&config(), backend).unwrap();

        assert_eq!(
            client.apply(&request()).await,
            Err(ApplyError::Status { status: 502 })
        );
        assert_eq!(client.backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_invalid_response() {
        let backend = FakeBackend::new()
            .with_response("apply-update.php", CannedResponse::Json(json!({ "ok": 1 })));
        let client = RemoteApplyClient::with_backend(&config(), backend).unwrap();

        assert!(matches!(
            client.apply(&request()).await,
            Err(ApplyError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_requires_key() {
        let mut config = RemoteClientConfig::new();
        config.apply_url = Some("https://site.example.com/apply-update.php".to_string());
        assert!(matches!(
            RemoteApplyClient::with_backend(&config, FakeBackend::new()),
            Err(RemoteError::NotConfigured { .. })
        ));
    }
}
