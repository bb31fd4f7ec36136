//! Contento - post composer with AI compliance feedback
//!
//! Writers get real-time feedback on a draft before publishing. Edits are
//! debounced into analysis calls, the returned text is classified as either a
//! policy alert or a list of suggestions, and publishing is gated on
//! acknowledging any policy alert.
//!
//! # Modules
//!
//! - [`domain`] - Feedback classification, example sets, drafts and posts
//! - [`composer`] - Debouncer, analysis client, example provider and the Composer state machine
//! - [`llm`] - LLM client trait and Anthropic implementation
//! - [`service`] - Prompting and parsing behind the two endpoints
//! - [`server`] - axum HTTP API
//! - [`tui`] - Terminal composer
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod api;
pub mod cli;
pub mod composer;
pub mod config;
pub mod domain;
pub mod llm;
pub mod server;
pub mod service;
pub mod tui;

// Re-export commonly used types
pub use composer::{
    AnalysisClient, AnalysisState, Backend, ClientError, Composer, ComposerEvent, ComposerPhase, Debouncer,
    ExampleProvider, FeedbackView, HttpBackend, PublishError,
};
pub use config::{ComposerConfig, Config, LlmConfig, ServerConfig};
pub use domain::{
    ExampleCategory, ExampleSet, FeedbackKind, FeedbackLine, FeedbackResult, PostDraft, PublishedPost, classify,
};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError};
pub use service::{FeedbackService, ServiceError};
