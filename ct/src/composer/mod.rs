//! Client-side post composer
//!
//! Debounced analysis of the draft, example loading, and the publish gate
//! that blocks posts carrying an unacknowledged policy alert.

mod analysis;
pub mod backend;
mod debounce;
mod error;
mod examples;
mod state;

pub use analysis::AnalysisClient;
pub use backend::{Backend, HttpBackend};
pub use debounce::Debouncer;
pub use error::{ClientError, PublishError};
pub use examples::ExampleProvider;
pub use state::{AnalysisState, Composer, ComposerEvent, ComposerPhase, FeedbackView};
