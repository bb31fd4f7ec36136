//! Analysis client - turns backend outcomes into feedback values

use std::sync::Arc;

use tracing::{debug, warn};

use super::Backend;
use crate::domain::{FeedbackResult, classify};

/// Fail-open wrapper around [`Backend::analyze`]
///
/// Every outcome becomes a value: blank text yields no feedback, failures
/// yield the retry message (classified as non-alert, so they never block
/// publishing).
#[derive(Clone)]
pub struct AnalysisClient {
    backend: Arc<dyn Backend>,
}

impl AnalysisClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub async fn analyze(&self, text: &str) -> Option<FeedbackResult> {
        debug!(text_len = text.len(), "AnalysisClient::analyze: called");
        if text.trim().is_empty() {
            debug!("AnalysisClient::analyze: blank text, skipping service");
            return None;
        }

        match self.backend.analyze(text).await {
            Ok(raw) => Some(classify(&raw)),
            Err(e) => {
                warn!(error = %e, "Error analyzing post");
                Some(FeedbackResult::retry())
            }
        }
    }
}
