//! LLM Client module
//!
//! Provides LLM completion requests for the feedback service.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use types::{CompletionRequest, CompletionResponse, Message, Role};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Fails with `LlmError::NotConfigured` when the API key is missing, which
/// callers may treat as "service unavailable" rather than fatal.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "anthropic" => {
            debug!("create_client: creating Anthropic client");
            Ok(Arc::new(AnthropicClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::NotConfigured(format!(
                "Unknown LLM provider: '{}'. Supported: anthropic",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_create_client_unknown_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(matches!(err, LlmError::NotConfigured(msg) if msg.contains("carrier-pigeon")));
    }

    #[test]
    #[serial]
    fn test_create_client_missing_key() {
        let config = LlmConfig {
            api_key_env: "CONTENTO_TEST_MISSING_KEY".to_string(),
            ..Default::default()
        };
        unsafe { std::env::remove_var("CONTENTO_TEST_MISSING_KEY") };

        let err = create_client(&config).err().unwrap();
        assert!(matches!(err, LlmError::NotConfigured(_)));
    }

    #[test]
    #[serial]
    fn test_create_client_anthropic() {
        let config = LlmConfig {
            api_key_env: "CONTENTO_TEST_PRESENT_KEY".to_string(),
            ..Default::default()
        };
        unsafe { std::env::set_var("CONTENTO_TEST_PRESENT_KEY", "sk-test") };

        assert!(create_client(&config).is_ok());

        unsafe { std::env::remove_var("CONTENTO_TEST_PRESENT_KEY") };
    }
}
