//! TUI application - key handling over the composer
//!
//! The App owns the Composer and the published feed. It does not render;
//! that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::composer::{Composer, ComposerEvent, PublishError};
use crate::domain::{ExampleCategory, PublishedPost};

/// Spinner frames shown while an analysis is running
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// TUI application
pub struct App {
    composer: Composer,
    /// Published posts, newest first
    feed: Vec<PublishedPost>,
    /// Transient status line
    status: Option<String>,
    /// Transient error line
    error: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    tick: usize,
}

impl App {
    pub fn new(composer: Composer) -> Self {
        Self {
            composer,
            feed: Vec::new(),
            status: None,
            error: None,
            show_help: false,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn feed(&self) -> &[PublishedPost] {
        &self.feed
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.tick % SPINNER.len()]
    }

    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Kick off the initial example load
    pub fn start(&mut self) {
        self.composer.load_examples();
    }

    /// Apply a composer event from the runner
    pub fn apply(&mut self, event: ComposerEvent) {
        if let ComposerEvent::ExamplesLoaded(Err(_)) = &event {
            self.error = Some("Could not load examples".to_string());
        }
        self.composer.apply(event);
    }

    pub fn shutdown(&mut self) {
        self.composer.shutdown();
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.error = None;

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(10) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        }

        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Esc, _) => {
                if self.composer.view().visible {
                    self.composer.edit();
                } else {
                    self.should_quit = true;
                }
            }

            // === Help ===
            (KeyCode::F(10), _) => self.show_help = true,

            // === Publish gate ===
            (KeyCode::Char('p'), KeyModifiers::CONTROL) => self.publish(),
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                if self.composer.feedback().is_some() {
                    self.composer.acknowledge();
                }
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => self.composer.edit(),

            // === Feedback popup ===
            (KeyCode::Char('f'), KeyModifiers::CONTROL) => {
                if self.composer.view().visible {
                    self.composer.hide_feedback();
                } else {
                    self.composer.show_feedback();
                }
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => self.composer.toggle_suggestion(),

            // === Examples ===
            (KeyCode::F(n @ 1..=3), _) => self.select_example(ExampleCategory::ALL[usize::from(n) - 1]),
            (KeyCode::F(5), _) => {
                if !self.composer.load_examples() {
                    self.status = Some("Examples are already loading".to_string());
                }
            }

            // === Editing ===
            (KeyCode::Enter, _) => self.edit_text(|text| text.push('\n')),
            (KeyCode::Backspace, _) => self.edit_text(|text| {
                text.pop();
            }),
            // AltGr arrives as CONTROL | ALT on some platforms
            (KeyCode::Char(c), mods) if !mods.contains(KeyModifiers::CONTROL) || mods.contains(KeyModifiers::ALT) => {
                self.edit_text(|text| text.push(c))
            }

            _ => {}
        }

        self.should_quit
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.composer.text().to_string();
        edit(&mut text);
        self.status = None;
        self.composer.set_text(text);
    }

    fn select_example(&mut self, category: ExampleCategory) {
        debug!(%category, "App::select_example: called");
        if self.composer.select_example(category) {
            self.status = Some(format!("Loaded {} example", category.label()));
        } else if self.composer.is_loading_examples() {
            self.status = Some("Examples are still loading".to_string());
        } else {
            self.error = Some("No examples available (F5 to retry)".to_string());
        }
    }

    fn publish(&mut self) {
        match self.composer.publish() {
            Ok(post) => {
                self.status = Some("Posted".to_string());
                self.feed.insert(0, post);
            }
            Err(PublishError::UnacknowledgedAlert) => {
                self.composer.show_feedback();
                self.error = Some("Review the policy alert first (Ctrl+A to post anyway)".to_string());
            }
            Err(PublishError::EmptyDraft) => {
                self.error = Some("Nothing to post".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::backend::mock::MockBackend;
    use crate::domain::ExampleSet;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    const ALERT: &str = "⚠️ Policy Alert: This may be spam.\n\nDrop the all-caps call to action.";

    fn new_app(backend: MockBackend) -> (App, UnboundedReceiver<ComposerEvent>) {
        let (composer, rx) = Composer::new(Arc::new(backend), Duration::from_millis(1000));
        (App::new(composer), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    async fn pump(app: &mut App, rx: &mut UnboundedReceiver<ComposerEvent>) {
        let event = rx.recv().await.expect("composer event");
        app.apply(event);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _rx) = new_app(MockBackend::new());
        assert!(app.handle_key(ctrl('c')));

        let (mut app, _rx) = new_app(MockBackend::new());
        assert!(app.handle_key(key(KeyCode::Esc)));
    }

    #[tokio::test]
    async fn test_typing_and_backspace() {
        let (mut app, _rx) = new_app(MockBackend::new());

        type_text(&mut app, "Hi!");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "x");
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.composer().text(), "Hi!\n");
    }

    #[tokio::test]
    async fn test_altgr_characters_are_typed() {
        let (mut app, _rx) = new_app(MockBackend::new());
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;

        app.handle_key(KeyEvent::new(KeyCode::Char('@'), altgr));
        app.handle_key(KeyEvent::new(KeyCode::Char('€'), altgr | KeyModifiers::SHIFT));
        app.handle_key(ctrl('x'));

        assert_eq!(app.composer().text(), "@€");
    }

    #[tokio::test]
    async fn test_publish_empty_shows_error() {
        let (mut app, _rx) = new_app(MockBackend::new());

        app.handle_key(ctrl('p'));

        assert_eq!(app.error(), Some("Nothing to post"));
        assert!(app.feed().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_flow_through_keys() {
        let (mut app, mut rx) = new_app(MockBackend::new().with_feedback(ALERT));

        type_text(&mut app, "BUY NOW");
        pump(&mut app, &mut rx).await;
        pump(&mut app, &mut rx).await;
        assert!(app.composer().view().visible);

        // Esc dismisses the popup instead of quitting
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert!(!app.composer().view().visible);

        // Blocked publish reopens the popup
        app.handle_key(ctrl('p'));
        assert!(app.composer().view().visible);
        assert!(app.feed().is_empty());

        app.handle_key(ctrl('a'));
        app.handle_key(ctrl('p'));
        assert_eq!(app.feed().len(), 1);
        assert!(app.feed()[0].over_alert);
        assert_eq!(app.composer().text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_function_keys_select_examples() {
        let set = ExampleSet::new("pro", "alert", "minor").unwrap();
        let (mut app, mut rx) = new_app(MockBackend::new().with_examples(Ok(set)).with_feedback("• Fine"));

        app.handle_key(key(KeyCode::F(1)));
        assert!(app.error().is_some());

        app.start();
        pump(&mut app, &mut rx).await;

        // F1 is the first category in display order: policy alert
        app.handle_key(key(KeyCode::F(1)));
        assert_eq!(app.composer().text(), "alert");
        assert_eq!(app.status(), Some("Loaded Policy Alert example"));
        assert!(app.composer().analysis().is_analyzing);

        app.handle_key(key(KeyCode::F(3)));
        assert_eq!(app.composer().text(), "pro");
    }

    #[tokio::test]
    async fn test_help_swallows_keys() {
        let (mut app, _rx) = new_app(MockBackend::new());

        app.handle_key(key(KeyCode::F(10)));
        assert!(app.show_help);
        type_text(&mut app, "ignored");
        assert_eq!(app.composer().text(), "");

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }
}
