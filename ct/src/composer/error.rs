//! Composer-side error types

use thiserror::Error;

/// Failure talking to the feedback backend
///
/// Never shown to the user directly: the analysis client converts it into
/// the retry message and the example provider logs it.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service error {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Why a publish attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("nothing to publish")]
    EmptyDraft,

    #[error("policy alert must be acknowledged before publishing")]
    UnacknowledgedAlert,
}
