//! Domain types for the post composer

mod example;
mod feedback;
mod post;

pub use example::{ExampleCategory, ExampleSet, ExampleSetError, RawExampleSet};
pub use feedback::{
    FeedbackKind, FeedbackLine, FeedbackResult, POLICY_ALERT_MARKER, RETRY_MESSAGE, SUGGESTIONS_PREAMBLE, classify,
};
pub use post::{PostDraft, PublishedPost};
