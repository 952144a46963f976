//! Remote activity table implementation of `ActivityLogPort`.

use async_trait::async_trait;
use themeup_core::{ActivityLogEntry, ActivityLogPort, RepositoryError};
use url::Url;

use crate::config::RemoteClientConfig;
use crate::endpoints::{auth_headers, table_url};
use crate::error::{RemoteError, RemoteResult, to_repository_error};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::wire::WireActivityRow;

/// Activity log client using the reqwest backend.
pub type DefaultActivityLog = RestActivityLog<ReqwestBackend>;

/// Appends rows to the remote activity table. Write-only.
pub struct RestActivityLog<B: HttpBackend> {
    backend: B,
    url: Url,
    headers: Vec<(&'static str, String)>,
}

impl DefaultActivityLog {
    pub fn new(config: &RemoteClientConfig) -> RemoteResult<Self> {
        Self::with_backend(config, ReqwestBackend::new(config)?)
    }
}

impl<B: HttpBackend> RestActivityLog<B> {
    pub(crate) fn with_backend(config: &RemoteClientConfig, backend: B) -> RemoteResult<Self> {
        let base_url = config
            .registry_url
            .as_deref()
            .ok_or(RemoteError::NotConfigured {
                what: "Registry URL",
            })?;
        let mut headers = auth_headers(config.registry_key.as_deref());
        headers.push(("Prefer", "return=minimal".to_string()));

        Ok(Self {
            backend,
            url: table_url(base_url, &config.activity_table)?,
            headers,
        })
    }
}

#[async_trait]
impl<B: HttpBackend> ActivityLogPort for RestActivityLog<B> {
    async fn record(&self, entry: &ActivityLogEntry) -> Result<(), RepositoryError> {
        self.backend
            .post_no_content(&self.url, &self.headers, &WireActivityRow::from(entry))
            .await
            .map_err(to_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use chrono::Utc;
    use themeup_core::{ActivityKind, ClientId};

    fn entry() -> ActivityLogEntry {
        ActivityLogEntry {
            client_id: ClientId::from_stored("client_abc"),
            update_id: "42".to_string(),
            version: "1.4.0".to_string(),
            activity: ActivityKind::ManualDownload,
            message: None,
            timestamp: Utc::now(),
        }
    }

    fn config() -> RemoteClientConfig {
        RemoteClientConfig::new().with_registry("https://xyz.supabase.co", Some("anon".to_string()))
    }

    #[tokio::test]
    async fn test_record_posts_row_with_minimal_return() {
        let backend = FakeBackend::new().with_response("update_activity", CannedResponse::Empty);
        let log = RestActivityLog::with_backend(&config(), backend).unwrap();

        log.record(&entry()).await.unwrap();

        let request = &log.backend.requests()[0];
        assert_eq!(request.method, "POST");
        assert!(request.url.ends_with("/rest/v1/update_activity"));
        assert_eq!(request.header("Prefer"), Some("return=minimal"));
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["activity"], "manual_download");
        assert_eq!(body["client_id"], "client_abc");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_rejected_insert_is_storage_error() {
        let backend = FakeBackend::new().with_response(
            "update_activity",
            CannedResponse::Status {
                status: 401,
                body: Some("{\"message\":\"JWT expired\"}".to_string()),
            },
        );
        let log = RestActivityLog::with_backend(&config(), backend).unwrap();

        assert!(matches!(
            log.record(&entry()).await,
            Err(RepositoryError::Storage(_))
        ));
    }
}
