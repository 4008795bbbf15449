//! Upstream JSON transport
//!
//! Strategies read provider payloads through `JsonSource` so the HTTP
//! client can be swapped out in tests.

use async_trait::async_trait;

use crate::error::FetchError;

/// GETs a URL and decodes the body as JSON
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}

/// `JsonSource` backed by a shared reqwest client
///
/// The client's timeout bounds every call.
#[derive(Clone)]
pub struct HttpJsonSource {
    client: reqwest::Client,
}

impl HttpJsonSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonSource for HttpJsonSource {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Provider(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Provider(format!(
                "GET {url} returned HTTP {status}"
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| FetchError::Provider(format!("GET {url} returned invalid JSON: {e}")))
    }
}
