//! Settings screen: player name, board size and timed mode.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use tracing::{debug, info, instrument, warn};

use crate::db::Settings;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::widgets;
use crate::GameService;

/// Longest accepted player name.
const MAX_NAME_LEN: usize = 16;

const FIELD_COUNT: usize = 3;

/// State for the settings screen.
#[derive(Debug)]
pub struct SettingsScreen {
    settings: Settings,
    list_state: ListState,
    editing_name: Option<String>,
}

impl SettingsScreen {
    /// Creates the screen pre-populated with the stored settings.
    #[instrument(skip(service))]
    pub fn new(service: &GameService) -> Self {
        debug!("Initializing SettingsScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            settings: service.settings(),
            list_state,
            editing_name: None,
        }
    }

    fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Changes the selected field; `forward` picks the direction for board size.
    #[instrument(skip(self))]
    fn change_selected(&mut self, forward: bool) {
        match self.selected() {
            0 => self.editing_name = Some(self.settings.player_name().clone()),
            1 => {
                let current = *self.settings.difficulty();
                let next = if forward {
                    current.next()
                } else {
                    current.previous()
                };
                self.settings = self.settings.with_difficulty(next);
            }
            _ => self.settings = self.settings.toggled_timed_mode(),
        }
    }

    /// Handles a key while the name is being typed.
    fn edit_name(&mut self, key: KeyEvent) {
        let Some(buffer) = self.editing_name.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) if !c.is_control() && buffer.chars().count() < MAX_NAME_LEN => {
                buffer.push(c);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let name = buffer.trim().to_string();
                if !name.is_empty() {
                    self.settings = self.settings.with_player_name(name);
                }
                self.editing_name = None;
            }
            KeyCode::Esc => self.editing_name = None,
            _ => {}
        }
    }

    /// Persists the settings and leaves.
    #[instrument(skip(self, service))]
    fn save_and_leave(&mut self, service: &GameService) -> ScreenTransition {
        match service.repositories().settings.save(self.settings.clone()) {
            Ok(()) => info!("Settings saved"),
            Err(e) => warn!(error = %e, "Failed to save settings"),
        }
        ScreenTransition::GoToMainMenu
    }
}

impl Screen for SettingsScreen {
    #[instrument(skip(self, frame, _service))]
    fn render(&self, frame: &mut Frame, _service: &GameService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Settings"), chunks[0]);

        let name = match &self.editing_name {
            Some(buffer) => format!("{}_", buffer),
            None => self.settings.player_name().clone(),
        };
        let difficulty = self.settings.difficulty();
        let items = vec![
            ListItem::new(format!("Player name     [ {} ]", name)),
            ListItem::new(format!(
                "Board size      [ {} ({} pairs, {}×{}) ]",
                difficulty.label(),
                difficulty.pair_count(),
                difficulty.columns(),
                difficulty.rows()
            )),
            ListItem::new(format!(
                "Timed mode      [ {} ]",
                if *self.settings.timed_mode() { "On" } else { "Off" }
            )),
        ];
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Preferences"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let help = if self.editing_name.is_some() {
            "Type a name | Enter: Confirm | Esc: Cancel"
        } else {
            "↑↓: Select | ←→ / Enter: Change | Esc: Save & Back"
        };
        frame.render_widget(widgets::help(help), chunks[2]);
    }

    #[instrument(skip(self, key, service))]
    fn handle_key(&mut self, key: KeyEvent, service: &GameService) -> ScreenTransition {
        if self.editing_name.is_some() {
            self.edit_name(key);
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Up => {
                let i = (self.selected() + FIELD_COUNT - 1) % FIELD_COUNT;
                self.list_state.select(Some(i));
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                let i = (self.selected() + 1) % FIELD_COUNT;
                self.list_state.select(Some(i));
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.change_selected(false);
                ScreenTransition::Stay
            }
            KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                self.change_selected(true);
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.save_and_leave(service),
            _ => ScreenTransition::Stay,
        }
    }
}
