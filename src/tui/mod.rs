//! Terminal UI for Memory Match.

mod controller;
mod screen;
mod screens;
mod widgets;

pub use controller::TuiController;
pub use screen::{Screen, ScreenTransition};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{error, info, instrument};

use crate::GameService;

/// Runs the TUI until the user quits.
///
/// `initial` picks the first screen; pass [`ScreenTransition::GoToMainMenu`]
/// for the menu or [`ScreenTransition::StartDaily`] to jump into today's
/// challenge. The terminal is restored even when the event loop fails.
#[instrument(skip(service))]
pub async fn run_tui(service: GameService, initial: ScreenTransition) -> Result<()> {
    info!("Starting Memory Match TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = TuiController::new(service).starting_with(initial);
    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}
