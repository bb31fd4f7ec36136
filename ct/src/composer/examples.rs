//! Example provider - loading state and last good example set

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, info, warn};

use super::{Backend, ClientError};
use crate::domain::{ExampleCategory, ExampleSet};

/// Tracks the loaded example set and whether a load is in flight
///
/// A failed load never replaces a previously loaded set.
pub struct ExampleProvider {
    backend: Arc<dyn Backend>,
    examples: Option<ExampleSet>,
    loading: bool,
}

impl ExampleProvider {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            examples: None,
            loading: false,
        }
    }

    pub fn examples(&self) -> Option<&ExampleSet> {
        self.examples.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Example text for a category, if a set is loaded and no load is running
    pub fn get(&self, category: ExampleCategory) -> Option<&str> {
        if self.loading {
            return None;
        }
        self.examples.as_ref().map(|set| set.get(category))
    }

    /// Mark a load as started and return the fetch to run
    ///
    /// Returns `None` if a load is already in flight.
    pub fn begin_load(&mut self) -> Option<BoxFuture<'static, Result<ExampleSet, ClientError>>> {
        if self.loading {
            debug!("ExampleProvider::begin_load: already loading");
            return None;
        }
        debug!("ExampleProvider::begin_load: starting");
        self.loading = true;
        let backend = Arc::clone(&self.backend);
        Some(async move { backend.examples().await }.boxed())
    }

    /// Record the outcome of a load started with `begin_load`
    ///
    /// Returns true if the example set was replaced.
    pub fn finish_load(&mut self, result: Result<ExampleSet, ClientError>) -> bool {
        self.loading = false;
        match result {
            Ok(set) => {
                info!("Examples loaded");
                self.examples = Some(set);
                true
            }
            Err(e) => {
                warn!(error = %e, "Error loading examples");
                false
            }
        }
    }

    /// Load in place, for callers without an event loop
    pub async fn load(&mut self) -> Option<&ExampleSet> {
        if let Some(fetch) = self.begin_load() {
            let result = fetch.await;
            self.finish_load(result);
        }
        self.examples.as_ref()
    }
}
