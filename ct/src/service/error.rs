//! Feedback service errors

use thiserror::Error;

use crate::llm::LlmError;

/// Errors raised while serving feedback or examples
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("feedback service is not configured")]
    NotConfigured,

    #[error("Content is required")]
    ContentRequired,

    #[error("analysis failed: {0}")]
    Analysis(#[source] LlmError),

    #[error("example generation failed: {0}")]
    ExampleGeneration(#[source] LlmError),

    #[error("example output rejected: {0}")]
    ExampleFormat(String),
}

impl ServiceError {
    /// HTTP status code this error maps to
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::NotConfigured => 503,
            ServiceError::ContentRequired => 400,
            ServiceError::Analysis(_) | ServiceError::ExampleGeneration(_) | ServiceError::ExampleFormat(_) => 500,
        }
    }

    /// Message shown to clients; internal details stay in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            ServiceError::NotConfigured => "Feedback service is not configured",
            ServiceError::ContentRequired => "Content is required",
            ServiceError::Analysis(_) => "Failed to analyze post",
            ServiceError::ExampleGeneration(_) | ServiceError::ExampleFormat(_) => {
                "Failed to generate examples. Please try again."
            }
        }
    }
}
