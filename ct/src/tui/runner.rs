//! TUI Runner - main loop that owns the terminal and drives the composer
//!
//! The TuiRunner is responsible for:
//! - Drawing the UI after every event
//! - Dispatching key events to App
//! - Feeding composer events (analysis results, example loads) back into App

use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::debug;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;
use crate::composer::{Composer, ComposerEvent};

/// Redraw cadence, ~10 FPS is plenty for a text editor with a spinner
const TICK_RATE: Duration = Duration::from_millis(100);

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    event_handler: EventHandler,
    composer_rx: mpsc::UnboundedReceiver<ComposerEvent>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, composer: Composer, composer_rx: mpsc::UnboundedReceiver<ComposerEvent>) -> Self {
        Self {
            app: App::new(composer),
            terminal,
            event_handler: EventHandler::new(TICK_RATE),
            composer_rx,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: called");
        self.app.start();

        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            tokio::select! {
                event = self.event_handler.next() => match event? {
                    Event::Tick => self.app.tick(),
                    Event::Key(key) => {
                        if self.app.handle_key(key) {
                            break;
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                },
                Some(event) = self.composer_rx.recv() => {
                    debug!(?event, "TuiRunner::run: composer event");
                    self.app.apply(event);
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        self.app.shutdown();
        Ok(())
    }
}
