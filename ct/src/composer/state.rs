//! Composer state machine
//!
//! The Composer is owned by a single event loop. Work that has to wait
//! (debounce timers, backend calls, example loads) runs on tokio tasks that
//! report back as [`ComposerEvent`]s on the channel returned by
//! [`Composer::new`]; the loop hands each one to [`Composer::apply`].
//!
//! Analyses are numbered. Only the response to the most recently issued
//! analysis is applied, so a slow early response can never overwrite the
//! feedback for newer text.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{AnalysisClient, Backend, ClientError, Debouncer, ExampleProvider, PublishError};
use crate::domain::{ExampleCategory, ExampleSet, FeedbackResult, PostDraft, PublishedPost};

/// Messages from background work back to the composer's event loop
#[derive(Debug)]
pub enum ComposerEvent {
    /// The debounce window closed for this text
    AnalyzeDue(String),
    /// An analysis finished; `seq` identifies which one
    AnalysisFinished { seq: u64, feedback: Option<FeedbackResult> },
    /// An example load finished
    ExamplesLoaded(Result<ExampleSet, ClientError>),
}

/// Feedback, analysis and acknowledgment state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisState {
    pub feedback: Option<FeedbackResult>,
    pub is_analyzing: bool,
    pub has_acknowledged: bool,
}

/// Feedback popup flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackView {
    pub visible: bool,
    pub show_suggestion: bool,
}

/// Where the composer is in the edit/review/publish cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerPhase {
    /// No text
    Idle,
    /// Text present, feedback pending or stale
    Editing,
    /// Policy alert awaiting acknowledgment
    Reviewing,
    /// Policy alert acknowledged
    Acknowledged,
    /// Suggestions only, nothing blocks publishing
    ClearToPost,
}

/// Post composer
pub struct Composer {
    draft: PostDraft,
    analysis: AnalysisState,
    view: FeedbackView,
    examples: ExampleProvider,
    client: AnalysisClient,
    debouncer: Debouncer<String>,
    events: mpsc::UnboundedSender<ComposerEvent>,
    /// Sequence number of the latest analysis issued (or invalidation)
    latest_seq: u64,
}

impl Composer {
    /// Create a composer and the receiver its background work reports to
    pub fn new(backend: Arc<dyn Backend>, debounce: Duration) -> (Self, mpsc::UnboundedReceiver<ComposerEvent>) {
        debug!(?debounce, "Composer::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        let due_tx = tx.clone();
        let debouncer = Debouncer::new(debounce, move |text: String| {
            let tx = due_tx.clone();
            async move {
                let _ = tx.send(ComposerEvent::AnalyzeDue(text));
            }
        });

        let composer = Self {
            draft: PostDraft::default(),
            analysis: AnalysisState::default(),
            view: FeedbackView::default(),
            examples: ExampleProvider::new(Arc::clone(&backend)),
            client: AnalysisClient::new(backend),
            debouncer,
            events: tx,
            latest_seq: 0,
        };
        (composer, rx)
    }

    // === Accessors ===

    pub fn text(&self) -> &str {
        self.draft.text()
    }

    pub fn analysis(&self) -> &AnalysisState {
        &self.analysis
    }

    pub fn feedback(&self) -> Option<&FeedbackResult> {
        self.analysis.feedback.as_ref()
    }

    pub fn view(&self) -> FeedbackView {
        self.view
    }

    pub fn examples(&self) -> Option<&ExampleSet> {
        self.examples.examples()
    }

    pub fn is_loading_examples(&self) -> bool {
        self.examples.is_loading()
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// True while an unacknowledged policy alert is the current feedback
    pub fn has_blocking_alert(&self) -> bool {
        self.analysis.feedback.as_ref().is_some_and(|f| f.is_policy_alert()) && !self.analysis.has_acknowledged
    }

    /// Publish is enabled iff there is text and no unacknowledged policy alert
    pub fn can_publish(&self) -> bool {
        !self.draft.is_blank() && !self.has_blocking_alert()
    }

    pub fn phase(&self) -> ComposerPhase {
        if self.draft.is_blank() {
            return ComposerPhase::Idle;
        }
        if self.analysis.is_analyzing || self.debouncer.is_pending() {
            return ComposerPhase::Editing;
        }
        match &self.analysis.feedback {
            None => ComposerPhase::Editing,
            Some(f) if f.is_policy_alert() && self.analysis.has_acknowledged => ComposerPhase::Acknowledged,
            Some(f) if f.is_policy_alert() => ComposerPhase::Reviewing,
            Some(_) => ComposerPhase::ClearToPost,
        }
    }

    // === Operations ===

    /// Replace the draft text
    ///
    /// Blank text resets analysis state at once; anything else is analyzed
    /// after the debounce window.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.set_text(text);
        if self.draft.is_blank() {
            debug!("Composer::set_text: draft cleared");
            self.debouncer.cancel();
            self.reset_analysis();
        } else {
            self.debouncer.schedule(self.draft.text().to_string());
        }
    }

    /// Analyze the current draft now, skipping the debounce window
    pub fn analyze_now(&mut self) {
        self.debouncer.cancel();
        let text = self.draft.text().to_string();
        self.start_analysis(text);
    }

    /// Put an example into the draft and analyze it immediately
    ///
    /// Returns false when no example set is available.
    pub fn select_example(&mut self, category: ExampleCategory) -> bool {
        let Some(text) = self.examples.get(category).map(str::to_string) else {
            debug!(%category, "Composer::select_example: no examples available");
            return false;
        };
        info!(%category, "Example selected");

        self.debouncer.cancel();
        self.draft.set_text(text.clone());
        self.analysis.feedback = None;
        self.analysis.has_acknowledged = false;
        self.view = FeedbackView::default();
        self.start_analysis(text);
        true
    }

    /// Publish the draft if the gate allows it, resetting the composer
    pub fn publish(&mut self) -> Result<PublishedPost, PublishError> {
        if self.draft.is_blank() {
            return Err(PublishError::EmptyDraft);
        }
        if self.has_blocking_alert() {
            return Err(PublishError::UnacknowledgedAlert);
        }

        let over_alert = self.analysis.feedback.as_ref().is_some_and(|f| f.is_policy_alert());
        self.debouncer.cancel();
        let text = self.draft.take();
        self.reset_analysis();

        info!(text_len = text.len(), over_alert, "Post published");
        Ok(PublishedPost {
            text,
            published_at: Utc::now(),
            over_alert,
        })
    }

    /// "Post Anyway" / "Got it": accept the current feedback
    pub fn acknowledge(&mut self) {
        debug!("Composer::acknowledge: called");
        self.analysis.has_acknowledged = true;
        self.view.visible = false;
    }

    /// Dismiss the feedback popup to keep editing, without acknowledging
    pub fn edit(&mut self) {
        debug!("Composer::edit: called");
        self.view.visible = false;
    }

    pub fn show_feedback(&mut self) {
        if self.analysis.feedback.is_some() {
            self.view.visible = true;
        }
    }

    pub fn hide_feedback(&mut self) {
        self.view.visible = false;
    }

    /// Reveal or hide the suggestion attached to a policy alert
    pub fn toggle_suggestion(&mut self) {
        if self.analysis.feedback.as_ref().is_some_and(|f| f.is_policy_alert()) {
            self.view.show_suggestion = !self.view.show_suggestion;
        }
    }

    /// Start loading examples in the background
    ///
    /// Returns false if a load is already running.
    pub fn load_examples(&mut self) -> bool {
        let Some(fetch) = self.examples.begin_load() else {
            return false;
        };
        let tx = self.events.clone();
        tokio::spawn(async move {
            let _ = tx.send(ComposerEvent::ExamplesLoaded(fetch.await));
        });
        true
    }

    /// Apply an event from background work
    ///
    /// Returns false if the event was stale and ignored.
    pub fn apply(&mut self, event: ComposerEvent) -> bool {
        match event {
            ComposerEvent::AnalyzeDue(text) => {
                if text != self.draft.text() {
                    debug!("Composer::apply: debounced text no longer current, skipping");
                    return false;
                }
                self.start_analysis(text);
                true
            }
            ComposerEvent::AnalysisFinished { seq, feedback } => {
                if seq != self.latest_seq {
                    debug!(seq, latest = self.latest_seq, "Composer::apply: discarding stale analysis");
                    return false;
                }
                self.finish_analysis(feedback);
                true
            }
            ComposerEvent::ExamplesLoaded(result) => self.examples.finish_load(result),
        }
    }

    /// Cancel pending timers; call when the composer is torn down
    pub fn shutdown(&mut self) {
        debug!("Composer::shutdown: called");
        self.debouncer.cancel();
    }

    // === Internals ===

    fn start_analysis(&mut self, text: String) {
        if text.trim().is_empty() {
            self.reset_analysis();
            return;
        }

        self.latest_seq += 1;
        let seq = self.latest_seq;
        debug!(seq, text_len = text.len(), "Composer::start_analysis: issuing");
        self.analysis.is_analyzing = true;
        self.analysis.has_acknowledged = false;

        let client = self.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let feedback = client.analyze(&text).await;
            let _ = tx.send(ComposerEvent::AnalysisFinished { seq, feedback });
        });
    }

    fn finish_analysis(&mut self, feedback: Option<FeedbackResult>) {
        self.analysis.is_analyzing = false;
        self.view.show_suggestion = false;
        match feedback {
            Some(feedback) => {
                if feedback.is_policy_alert() {
                    debug!("Composer::finish_analysis: policy alert");
                    self.view.visible = true;
                } else {
                    self.analysis.has_acknowledged = true;
                }
                self.analysis.feedback = Some(feedback);
            }
            None => {
                self.analysis.feedback = None;
                self.analysis.has_acknowledged = false;
            }
        }
    }

    /// Reset to the initial analysis state and orphan in-flight analyses
    fn reset_analysis(&mut self) {
        self.latest_seq += 1;
        self.analysis = AnalysisState::default();
        self.view = FeedbackView::default();
    }
}

impl Drop for Composer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
