//! Feedback service
//!
//! Server-side logic behind `/analyze` and `/examples`: builds prompts, calls
//! the LLM, and turns its free text into wire values. The HTTP server wraps
//! this, and the composer can also use it in-process.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

mod error;
pub mod prompts;

pub use error::ServiceError;

use crate::config::LlmConfig;
use crate::domain::ExampleSet;
use crate::llm::{CompletionRequest, LlmClient, create_client};

use prompts::{
    ANALYZE_MAX_TOKENS, ANALYZE_SYSTEM_PROMPT, EXAMPLES_MAX_TOKENS, EXAMPLES_SYSTEM_PROMPT, EXAMPLES_USER_PROMPT,
    NO_FEEDBACK_TEXT, analyze_user_prompt,
};

/// Feedback and example generation over an LLM client
///
/// Built once at startup. A missing client means the process is not
/// configured; every call then fails closed with `NotConfigured`.
#[derive(Clone)]
pub struct FeedbackService {
    llm: Option<Arc<dyn LlmClient>>,
}

impl FeedbackService {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm: Some(llm) }
    }

    /// Service with no LLM behind it
    pub fn unconfigured() -> Self {
        Self { llm: None }
    }

    /// Build from configuration, degrading to unconfigured on error
    pub fn from_config(config: &LlmConfig) -> Self {
        debug!(provider = %config.provider, "FeedbackService::from_config: called");
        match create_client(config) {
            Ok(llm) => {
                info!(provider = %config.provider, model = %config.model, "Feedback service configured");
                Self::new(llm)
            }
            Err(e) => {
                warn!(error = %e, "Feedback service not configured; requests will be refused");
                Self::unconfigured()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    fn client(&self) -> Result<&Arc<dyn LlmClient>, ServiceError> {
        self.llm.as_ref().ok_or(ServiceError::NotConfigured)
    }

    /// Review a post and return the model's feedback text
    pub async fn analyze(&self, content: &str) -> Result<String, ServiceError> {
        debug!(content_len = content.len(), "FeedbackService::analyze: called");
        if content.trim().is_empty() {
            debug!("FeedbackService::analyze: empty content");
            return Err(ServiceError::ContentRequired);
        }
        let llm = self.client()?;

        let request = CompletionRequest::single(ANALYZE_SYSTEM_PROMPT, analyze_user_prompt(content), ANALYZE_MAX_TOKENS);
        let response = llm.complete(request).await.map_err(|e| {
            error!(error = %e, "Error analyzing post");
            ServiceError::Analysis(e)
        })?;

        Ok(response.content.unwrap_or_else(|| {
            warn!("FeedbackService::analyze: model returned no text");
            NO_FEEDBACK_TEXT.to_string()
        }))
    }

    /// Generate a fresh set of example posts
    pub async fn examples(&self) -> Result<ExampleSet, ServiceError> {
        debug!("FeedbackService::examples: called");
        let llm = self.client()?;

        let request = CompletionRequest::single(EXAMPLES_SYSTEM_PROMPT, EXAMPLES_USER_PROMPT, EXAMPLES_MAX_TOKENS);
        let response = llm.complete(request).await.map_err(|e| {
            error!(error = %e, "Error generating examples");
            ServiceError::ExampleGeneration(e)
        })?;

        let text = response.content.unwrap_or_default();
        parse_examples(&text).inspect_err(|e| {
            error!(error = %e, output = %text, "Error parsing example output");
        })
    }
}

/// Parse the model's example output
///
/// Accepts a bare JSON object, one wrapped in a code fence, or one embedded
/// in surrounding chatter.
pub fn parse_examples(text: &str) -> Result<ExampleSet, ServiceError> {
    debug!(text_len = text.len(), "parse_examples: called");
    let trimmed = strip_code_fence(text.trim());

    match serde_json::from_str::<ExampleSet>(trimmed) {
        Ok(set) => Ok(set),
        Err(first) => {
            debug!(error = %first, "parse_examples: direct parse failed, looking for embedded object");
            let (start, end) = match (trimmed.find('{'), trimmed.rfind('}')) {
                (Some(start), Some(end)) if start < end => (start, end),
                _ => return Err(ServiceError::ExampleFormat(first.to_string())),
            };
            serde_json::from_str::<ExampleSet>(&trimmed[start..=end])
                .map_err(|e| ServiceError::ExampleFormat(e.to_string()))
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip an optional language tag on the fence line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
