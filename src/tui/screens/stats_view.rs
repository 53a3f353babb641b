//! Statistics view screen: per-board-size records.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};
use strum::IntoEnumIterator;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::db::GameStats;
use crate::game::{Difficulty, format_time};
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::widgets;
use crate::GameService;

/// State for the statistics screen.
#[derive(Debug)]
pub struct StatsViewScreen {
    stats: watch::Receiver<Vec<GameStats>>,
}

impl StatsViewScreen {
    /// Creates the screen, following the stats repository.
    #[instrument(skip(service))]
    pub fn new(service: &GameService) -> Self {
        debug!("Initializing StatsViewScreen");
        Self {
            stats: service.repositories().stats.subscribe(),
        }
    }
}

fn stats_row(difficulty: Difficulty, stats: Option<&GameStats>) -> Row<'static> {
    let label = format!("{} ({})", difficulty.label(), difficulty.pair_count());
    match stats {
        Some(s) => Row::new(vec![
            Cell::from(label),
            Cell::from(s.games_played().to_string()),
            Cell::from(s.games_completed().to_string()),
            Cell::from(format!("{:.0}%", s.completion_rate())),
            Cell::from(s.best_score().to_string()),
            Cell::from(
                (*s.best_time())
                    .map(|t| format_time(t.max(0) as u64))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::from(
                (*s.best_moves())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]),
        None => Row::new(vec![
            Cell::from(label),
            Cell::from("0"),
            Cell::from("0"),
            Cell::from("-"),
            Cell::from("-"),
            Cell::from("-"),
            Cell::from("-"),
        ])
        .style(Style::default().fg(Color::DarkGray)),
    }
}

impl Screen for StatsViewScreen {
    #[instrument(skip(self, frame, _service))]
    fn render(&self, frame: &mut Frame, _service: &GameService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Statistics"), chunks[0]);

        let header = Row::new(
            ["Board", "Played", "Cleared", "Rate", "Best", "Time", "Moves"]
                .into_iter()
                .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .style(Style::default().fg(Color::Yellow));

        let all = self.stats.borrow();
        let rows: Vec<Row> = Difficulty::iter()
            .map(|d| {
                let pairs = d.pair_count() as i32;
                stats_row(d, all.iter().find(|s| *s.pair_count() == pairs))
            })
            .collect();

        let widths = [
            Constraint::Percentage(22),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(10),
            Constraint::Percentage(14),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("By board size"));
        frame.render_widget(table, chunks[1]);

        frame.render_widget(widgets::help("Esc / b: Back | q: Quit"), chunks[2]);
    }

    #[instrument(skip(self, key, _service))]
    fn handle_key(&mut self, key: KeyEvent, _service: &GameService) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                info!("Returning to main menu from stats");
                ScreenTransition::GoToMainMenu
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
