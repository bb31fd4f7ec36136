//! Backends the composer can talk to
//!
//! [`HttpBackend`] calls the feedback API over HTTP. [`FeedbackService`]
//! also implements [`Backend`] so the composer can run without a server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ClientError;
use crate::api::{ANALYZE_PATH, AnalyzeRequest, EXAMPLES_PATH, ErrorResponse};
use crate::domain::{ExampleSet, RawExampleSet};
use crate::service::FeedbackService;

/// Source of feedback text and example posts
#[async_trait]
pub trait Backend: Send + Sync {
    /// Raw feedback text for a post
    async fn analyze(&self, content: &str) -> Result<String, ClientError>;

    /// A validated example set
    async fn examples(&self) -> Result<ExampleSet, ClientError>;
}

/// Feedback API client over HTTP
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host:3000/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, ?timeout, "HttpBackend::new: called");
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a response body, mapping non-2xx and `{error}` bodies to service errors
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        let value: serde_json::Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                debug!(status = status.as_u16(), "HttpBackend::decode: non-JSON error body");
                return Err(ClientError::Service {
                    status: status.as_u16(),
                    message: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }
            Err(e) => return Err(ClientError::Decode(e.to_string())),
        };

        if let Ok(ErrorResponse { error }) = serde_json::from_value::<ErrorResponse>(value.clone()) {
            debug!(status = status.as_u16(), %error, "HttpBackend::decode: error body");
            return Err(ClientError::Service {
                status: status.as_u16(),
                message: error,
            });
        }

        if !status.is_success() {
            debug!(status = status.as_u16(), "HttpBackend::decode: non-success status");
            return Err(ClientError::Service {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[derive(serde::Deserialize)]
struct FeedbackBody {
    feedback: Option<String>,
}

#[async_trait]
impl Backend for HttpBackend {
    async fn analyze(&self, content: &str) -> Result<String, ClientError> {
        debug!(content_len = content.len(), "HttpBackend::analyze: called");
        let response = self
            .http
            .post(self.url(ANALYZE_PATH))
            .json(&AnalyzeRequest {
                content: Some(content.to_string()),
            })
            .send()
            .await?;

        let body: FeedbackBody = Self::decode(response).await?;
        body.feedback
            .ok_or_else(|| ClientError::Decode("response has no feedback field".to_string()))
    }

    async fn examples(&self) -> Result<ExampleSet, ClientError> {
        debug!("HttpBackend::examples: called");
        let response = self.http.get(self.url(EXAMPLES_PATH)).send().await?;

        let raw: RawExampleSet = Self::decode(response).await?;
        ExampleSet::try_from(raw).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Backend for FeedbackService {
    async fn analyze(&self, content: &str) -> Result<String, ClientError> {
        FeedbackService::analyze(self, content)
            .await
            .map_err(|e| ClientError::Service {
                status: e.status(),
                message: e.to_string(),
            })
    }

    async fn examples(&self) -> Result<ExampleSet, ClientError> {
        FeedbackService::examples(self).await.map_err(|e| ClientError::Service {
            status: e.status(),
            message: e.to_string(),
        })
    }
}
