//! Main menu screen: hub for starting games and browsing records.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::GameService;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::widgets;

/// Menu options available in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Continue,
    NewGame,
    DailyChallenge,
    Statistics,
    Leaderboard,
    Settings,
    Quit,
}

impl MenuOption {
    #[instrument]
    fn label(self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::NewGame => "New Game",
            Self::DailyChallenge => "Daily Challenge",
            Self::Statistics => "Statistics",
            Self::Leaderboard => "Leaderboard",
            Self::Settings => "Settings",
            Self::Quit => "Quit",
        }
    }

    fn transition(self) -> ScreenTransition {
        match self {
            Self::Continue => ScreenTransition::ResumeGame,
            Self::NewGame => ScreenTransition::StartGame,
            Self::DailyChallenge => ScreenTransition::GoToDaily,
            Self::Statistics => ScreenTransition::GoToStats,
            Self::Leaderboard => ScreenTransition::GoToLeaderboard,
            Self::Settings => ScreenTransition::GoToSettings,
            Self::Quit => ScreenTransition::Quit,
        }
    }
}

/// State for the main menu screen.
#[derive(Debug)]
pub struct MainMenuScreen {
    saved_game: watch::Receiver<bool>,
    list_state: ListState,
}

impl MainMenuScreen {
    /// Creates the main menu, watching whether a resumable game exists.
    #[instrument(skip(service))]
    pub fn new(service: &GameService) -> Self {
        debug!("Initializing MainMenuScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            saved_game: service.repositories().saved_game.subscribe(),
            list_state,
        }
    }

    /// Options shown right now; `Continue` only when a saved game exists.
    fn options(&self) -> Vec<MenuOption> {
        let mut options = Vec::with_capacity(7);
        if *self.saved_game.borrow() {
            options.push(MenuOption::Continue);
        }
        options.extend([
            MenuOption::NewGame,
            MenuOption::DailyChallenge,
            MenuOption::Statistics,
            MenuOption::Leaderboard,
            MenuOption::Settings,
            MenuOption::Quit,
        ]);
        options
    }

    #[instrument(skip(self))]
    fn select_previous(&mut self) {
        let count = self.options().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    #[instrument(skip(self))]
    fn select_next(&mut self) {
        let count = self.options().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> MenuOption {
        let options = self.options();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }
}

impl Screen for MainMenuScreen {
    #[instrument(skip(self, frame, service))]
    fn render(&self, frame: &mut Frame, service: &GameService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Memory Match"), chunks[0]);

        let settings = service.settings();
        let profile_text = format!(
            "Player: {}   Board: {} ({} pairs)   Timed: {}",
            settings.player_name(),
            settings.difficulty().label(),
            settings.difficulty().pair_count(),
            if *settings.timed_mode() { "on" } else { "off" }
        );
        let profile_bar = Paragraph::new(profile_text)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(profile_bar, chunks[1]);

        let items: Vec<ListItem> = self
            .options()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        frame.render_widget(
            widgets::help("↑↓: Navigate | Enter: Select | q: Quit"),
            chunks[3],
        );
    }

    #[instrument(skip(self, key, _service))]
    fn handle_key(&mut self, key: KeyEvent, _service: &GameService) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                option.transition()
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
