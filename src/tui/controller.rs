//! TUI controller: the state machine driving the multi-screen game.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

use crate::GameService;
use crate::session::GameSession;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::screens::{
    DailyChallengeScreen, GameBoardScreen, GameOverScreen, LeaderboardScreen, MainMenuScreen,
    SettingsScreen, StatsViewScreen,
};

/// How long to wait for input before ticking the clock.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Active screen in the state machine.
#[derive(Debug)]
enum ActiveScreen {
    MainMenu(MainMenuScreen),
    GameBoard(Box<GameBoardScreen>),
    GameOver(GameOverScreen),
    Stats(StatsViewScreen),
    Leaderboard(LeaderboardScreen),
    Daily(DailyChallengeScreen),
    Settings(SettingsScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::MainMenu(s) => s,
            Self::GameBoard(s) => s.as_ref(),
            Self::GameOver(s) => s,
            Self::Stats(s) => s,
            Self::Leaderboard(s) => s,
            Self::Daily(s) => s,
            Self::Settings(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::MainMenu(s) => s,
            Self::GameBoard(s) => s.as_mut(),
            Self::GameOver(s) => s,
            Self::Stats(s) => s,
            Self::Leaderboard(s) => s,
            Self::Daily(s) => s,
            Self::Settings(s) => s,
        }
    }
}

/// Controller that drives the screen state machine.
///
/// Call [`TuiController::run`] to start the event loop.
#[derive(Debug)]
pub struct TuiController {
    service: GameService,
    initial: ScreenTransition,
}

impl TuiController {
    /// Creates a controller that opens on the main menu.
    #[instrument(skip(service))]
    pub fn new(service: GameService) -> Self {
        info!("Creating TuiController");
        Self {
            service,
            initial: ScreenTransition::GoToMainMenu,
        }
    }

    /// Opens on the screen `transition` leads to instead of the main menu.
    #[instrument(skip(self))]
    pub fn starting_with(mut self, transition: ScreenTransition) -> Self {
        self.initial = transition;
        self
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend + std::io::Write>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting TUI event loop");

        let placeholder = ActiveScreen::MainMenu(MainMenuScreen::new(&self.service));
        let initial = self.initial.clone();
        let Some(mut screen) = self.apply_transition(initial, placeholder) else {
            return Ok(());
        };
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| screen.as_screen().render(f, &self.service))?;

            let mut transition = ScreenTransition::Stay;
            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                transition = screen.as_screen_mut().handle_key(key, &self.service);
            }

            let now = Instant::now();
            let delta = now.duration_since(last_tick);
            last_tick = now;
            if matches!(transition, ScreenTransition::Stay) {
                transition = screen.as_screen_mut().tick(delta, &self.service);
            }

            screen = match self.apply_transition(transition, screen) {
                Some(next) => next,
                None => {
                    info!("TUI quitting");
                    return Ok(());
                }
            };

            sleep(Duration::from_millis(5)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        if !matches!(transition, ScreenTransition::Stay) {
            debug!(transition = ?transition, "Applying screen transition");
        }
        let today = today();
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToMainMenu => Some(self.main_menu()),

            ScreenTransition::StartGame => {
                let settings = self.service.settings();
                info!(
                    difficulty = %settings.difficulty(),
                    timed = settings.timed_mode(),
                    "Starting new game"
                );
                let session = GameSession::start(*settings.difficulty(), *settings.timed_mode());
                Some(Self::board(session))
            }

            ScreenTransition::ResumeGame => match self.service.resume(today) {
                Ok(Some(session)) => Some(Self::board(session)),
                Ok(None) => {
                    info!("Nothing to resume");
                    Some(self.main_menu())
                }
                Err(e) => {
                    error!(error = %e, "Failed to resume saved game");
                    Some(self.main_menu())
                }
            },

            ScreenTransition::StartDaily => {
                info!(date = %today, "Starting daily challenge");
                Some(Self::board(GameSession::daily(today)))
            }

            ScreenTransition::GoToGameOver(report) => {
                Some(ActiveScreen::GameOver(GameOverScreen::new(*report)))
            }

            ScreenTransition::GoToStats => {
                Some(ActiveScreen::Stats(StatsViewScreen::new(&self.service)))
            }

            ScreenTransition::GoToLeaderboard => {
                let difficulty = *self.service.settings().difficulty();
                Some(ActiveScreen::Leaderboard(LeaderboardScreen::new(
                    &self.service,
                    difficulty,
                )))
            }

            ScreenTransition::GoToDaily => Some(ActiveScreen::Daily(DailyChallengeScreen::new(
                &self.service,
                today,
            ))),

            ScreenTransition::GoToSettings => {
                Some(ActiveScreen::Settings(SettingsScreen::new(&self.service)))
            }

            ScreenTransition::Quit => None,
        }
    }

    fn main_menu(&self) -> ActiveScreen {
        ActiveScreen::MainMenu(MainMenuScreen::new(&self.service))
    }

    fn board(session: GameSession) -> ActiveScreen {
        ActiveScreen::GameBoard(Box::new(GameBoardScreen::new(session)))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
