//! Terminal composer
//!
//! A single-screen TUI around [`Composer`]:
//! - Draft editor with debounced feedback
//! - Example buttons (F1-F3) and refresh (F5)
//! - Feedback popup with the Post Anyway / Edit gate
//! - Feed of posts published this session

mod app;
mod events;
mod runner;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;

use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::composer::{Composer, ComposerEvent};

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the composer TUI until the user quits
pub async fn run(composer: Composer, composer_rx: mpsc::UnboundedReceiver<ComposerEvent>) -> Result<()> {
    let terminal = init()?;

    // Restore the terminal even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let mut runner = TuiRunner::new(terminal, composer, composer_rx);
    runner.run().await
}
