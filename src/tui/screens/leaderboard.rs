//! Leaderboard screen: top scores for one board size at a time.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::game::{Difficulty, format_time};
use crate::repository::LeaderboardView;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::widgets;
use crate::GameService;

/// State for the leaderboard screen.
#[derive(Debug)]
pub struct LeaderboardScreen {
    view: watch::Receiver<LeaderboardView>,
    difficulty: Difficulty,
}

impl LeaderboardScreen {
    /// Creates the screen showing `difficulty` first.
    #[instrument(skip(service))]
    pub fn new(service: &GameService, difficulty: Difficulty) -> Self {
        debug!("Initializing LeaderboardScreen");
        Self {
            view: service.repositories().leaderboard.subscribe(),
            difficulty,
        }
    }
}

impl Screen for LeaderboardScreen {
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

        let heading = format!(
            "Leaderboard ◀ {} ({} pairs) ▶",
            self.difficulty.label(),
            self.difficulty.pair_count()
        );
        frame.render_widget(widgets::title(&heading), chunks[0]);

        let header = Row::new(
            ["#", "Player", "Score", "Time", "Moves", "Date"]
                .into_iter()
                .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .style(Style::default().fg(Color::Yellow));

        let view = self.view.borrow();
        let entries = view
            .get(&(self.difficulty.pair_count() as i32))
            .map(Vec::as_slice)
            .unwrap_or_default();
        let rows: Vec<Row> = entries
            .iter()
            .enumerate()
            .map(|(rank, e)| {
                Row::new(vec![
                    Cell::from((rank + 1).to_string()),
                    Cell::from(e.player_name().clone()),
                    Cell::from(e.score().to_string()),
                    Cell::from(format_time((*e.time_seconds()).max(0) as u64)),
                    Cell::from(e.moves().to_string()),
                    Cell::from(e.played_at().format("%Y-%m-%d").to_string()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Percentage(30),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(12),
            Constraint::Percentage(20),
        ];
        let title = if entries.is_empty() {
            "No scores yet"
        } else {
            "Top scores"
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, chunks[1]);

        frame.render_widget(
            widgets::help("←→: Board size | Esc / b: Back | q: Quit"),
            chunks[2],
        );
    }

    #[instrument(skip(self, key, _service))]
    fn handle_key(&mut self, key: KeyEvent, _service: &GameService) -> ScreenTransition {
        match key.code {
            KeyCode::Left => {
                self.difficulty = self.difficulty.previous();
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.difficulty = self.difficulty.next();
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                ScreenTransition::GoToMainMenu
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
