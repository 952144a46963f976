//! HTTP backend abstraction.
//!
//! Adapters are generic over [`HttpBackend`] so tests can swap in a fake.
//! The production backend uses reqwest and sends every request exactly
//! once; a failed registry read waits for the poller's next tick.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::RemoteClientConfig;
use crate::error::{RemoteError, RemoteResult};

/// Extra request headers as `(name, value)` pairs.
pub type Headers = [(&'static str, String)];

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// JSON-over-HTTP operations the adapters need.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET `url` and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url, headers: &Headers)
    -> RemoteResult<T>;

    /// POST `body` as JSON and deserialize the JSON reply.
    async fn post_json<B, T>(&self, url: &Url, headers: &Headers, body: &B) -> RemoteResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    /// POST `body` as JSON and ignore the reply body.
    async fn post_no_content<B: Serialize + Sync>(
        &self,
        url: &Url,
        headers: &Headers,
        body: &B,
    ) -> RemoteResult<()>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
#[derive(Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Backend for registry reads and activity writes.
    pub fn new(config: &RemoteClientConfig) -> RemoteResult<Self> {
        Self::build(config, config.timeout)
    }

    /// Backend for apply requests, which use the longer apply timeout.
    pub fn for_apply(config: &RemoteClientConfig) -> RemoteResult<Self> {
        Self::build(config, config.apply_timeout)
    }

    fn build(config: &RemoteClientConfig, timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    fn with_headers(
        mut request: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        request
    }

    /// Turn a non-success response into [`RemoteError::RequestFailed`].
    async fn check_status(response: reqwest::Response) -> RemoteResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.ok().filter(|b| !b.is_empty());
        Err(RemoteError::RequestFailed {
            status: status.as_u16(),
            url,
            body,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        headers: &Headers,
    ) -> RemoteResult<T> {
        let request = Self::with_headers(self.client.get(url.as_str()), headers);
        let response = Self::check_status(request.send().await?).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn post_json<B, T>(&self, url: &Url, headers: &Headers, body: &B) -> RemoteResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let request = Self::with_headers(self.client.post(url.as_str()), headers).json(body);
        let response = Self::check_status(request.send().await?).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn post_no_content<B: Serialize + Sync>(
        &self,
        url: &Url,
        headers: &Headers,
        body: &B,
    ) -> RemoteResult<()> {
        let request = Self::with_headers(self.client.post(url.as_str()), headers).json(body);
        Self::check_status(request.send().await?).await?;
        Ok(())
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Canned reply for the fake backend.
    #[derive(Clone)]
    pub enum CannedResponse {
        Json(serde_json::Value),
        Status { status: u16, body: Option<String> },
        Empty,
    }

    /// A request the fake backend received.
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub headers: Vec<(&'static str, String)>,
        pub body: Option<serde_json::Value>,
    }

    impl RecordedRequest {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str())
        }
    }

    /// A fake HTTP backend that returns canned responses by URL substring.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Mutex<Vec<(String, CannedResponse)>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url_contains: &str, response: CannedResponse) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push((url_contains.to_string(), response));
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn respond(
            &self,
            method: &'static str,
            url: &Url,
            headers: &Headers,
            body: Option<serde_json::Value>,
        ) -> RemoteResult<Option<serde_json::Value>> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                url: url.to_string(),
                headers: headers.to_vec(),
                body,
            });

            let canned = self
                .responses
                .lock()
                .unwrap()
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                .map(|(_, response)| response.clone());

            match canned {
                Some(CannedResponse::Json(json)) => Ok(Some(json)),
                Some(CannedResponse::Empty) => Ok(None),
                Some(CannedResponse::Status { status, body }) => Err(RemoteError::RequestFailed {
                    status,
                    url: url.to_string(),
                    body,
                }),
                None => Err(RemoteError::RequestFailed {
                    status: 404,
                    url: url.to_string(),
                    body: None,
                }),
            }
        }

        fn decode<T: DeserializeOwned>(json: Option<serde_json::Value>) -> RemoteResult<T> {
            Ok(serde_json::from_value(json.unwrap_or_default())?)
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(
            &self,
            url: &Url,
            headers: &Headers,
        ) -> RemoteResult<T> {
            Self::decode(self.respond("GET", url, headers, None)?)
        }

        async fn post_json<B, T>(&self, url: &Url, headers: &Headers, body: &B) -> RemoteResult<T>
        where
            B: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            let body = serde_json::to_value(body)?;
            Self::decode(self.respond("POST", url, headers, Some(body))?)
        }

        async fn post_no_content<B: Serialize + Sync>(
            &self,
            url: &Url,
            headers: &Headers,
            body: &B,
        ) -> RemoteResult<()> {
            let body = serde_json::to_value(body)?;
            self.respond("POST", url, headers, Some(body))?;
            Ok(())
        }
    }
}
