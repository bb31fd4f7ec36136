//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Failure of a single completion call
#[derive(Debug, Error)]
pub enum LlmError {
    /// 429 from the provider; surfaced immediately, never retried in-call
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl LlmError {
    /// Whether the same request may succeed if sent again after a short backoff
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::ApiError { status, .. } => matches!(status, 408 | 500 | 502 | 503 | 504 | 529),
            LlmError::Network(_) => true,
            LlmError::RateLimited { .. } | LlmError::InvalidResponse(_) | LlmError::NotConfigured(_) => false,
        }
    }
}
