//! The two HTTP calls the client makes against the refactoring agent.
//!
//! [`Backend`] is the seam between the orchestrator and the network. The
//! production implementation is [`HttpBackend`]; tests substitute fixtures.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::error::RequestError;
use crate::types::{AnalyzeRequest, AnalyzeResponse, MirrorTestResponse};

/// Remote agent service.
///
/// Futures must be `Send` because a run executes on a spawned tokio task.
pub trait Backend: Send + Sync {
    /// `POST /analyze-and-refactor` for `legacy_file`.
    fn analyze(
        &self,
        legacy_file: &str,
    ) -> impl Future<Output = Result<AnalyzeResponse, RequestError>> + Send;

    /// `GET /mirror-test`.
    fn mirror_test(&self) -> impl Future<Output = Result<MirrorTestResponse, RequestError>> + Send;
}

/// reqwest-backed [`Backend`] talking to `base_url`.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` (trailing slashes are ignored).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Checks the status and decodes the body of a finished request.
///
/// The body is read as bytes and decoded with serde_json so that decode
/// failures stay distinguishable from transport failures in the logs.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
    let status = response.status();
    if !status.is_success() {
        return Err(RequestError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl Backend for HttpBackend {
    async fn analyze(&self, legacy_file: &str) -> Result<AnalyzeResponse, RequestError> {
        let body = AnalyzeRequest { legacy_file: legacy_file.to_owned() };
        tracing::debug!(url = %self.url("analyze-and-refactor"), legacy_file, "requesting analysis");
        let response = self
            .client
            .post(self.url("analyze-and-refactor"))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    async fn mirror_test(&self) -> Result<MirrorTestResponse, RequestError> {
        tracing::debug!(url = %self.url("mirror-test"), "requesting mirror test");
        let response = self.client.get(self.url("mirror-test")).send().await?;
        decode(response).await
    }
}
