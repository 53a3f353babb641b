//! Screen trait and transition type for the menu state machine.

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::{GameReport, GameService};

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] and [`Screen::tick`] to
/// drive the [`TuiController`](crate::tui::TuiController) state machine.
#[derive(Debug, Clone)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the main menu.
    GoToMainMenu,
    /// Deal a new free-play game using the saved settings.
    StartGame,
    /// Resume the saved in-progress game.
    ResumeGame,
    /// Play today's daily challenge.
    StartDaily,
    /// Show the score breakdown of a finished game.
    GoToGameOver(Box<GameReport>),
    /// Navigate to the statistics view.
    GoToStats,
    /// Navigate to the leaderboard.
    GoToLeaderboard,
    /// Navigate to the daily challenge overview.
    GoToDaily,
    /// Navigate to the settings screen.
    GoToSettings,
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the menu state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, service: &GameService);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, service: &GameService) -> ScreenTransition;

    /// Advances time-dependent state by `delta`.
    fn tick(&mut self, _delta: Duration, _service: &GameService) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
