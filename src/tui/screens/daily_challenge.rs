//! Daily challenge screen: today's status, streak and recent results.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::db::DailyChallengeEntity;
use crate::game::format_time;
use crate::repository::DAILY_DIFFICULTY;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::widgets;
use crate::GameService;

/// State for the daily challenge screen.
#[derive(Debug)]
pub struct DailyChallengeScreen {
    today: NaiveDate,
    streak: u32,
    completed_count: i64,
    recent: watch::Receiver<Vec<DailyChallengeEntity>>,
}

impl DailyChallengeScreen {
    /// Creates the screen for `today`.
    #[instrument(skip(service))]
    pub fn new(service: &GameService, today: NaiveDate) -> Self {
        let daily = &service.repositories().daily;
        let streak = daily.current_streak(today).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to compute streak");
            0
        });
        let completed_count = daily.completed_count().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to count completed challenges");
            0
        });
        debug!(streak, completed_count, "Initializing DailyChallengeScreen");
        Self {
            today,
            streak,
            completed_count,
            recent: daily.subscribe(),
        }
    }

    fn today_result(&self) -> Option<DailyChallengeEntity> {
        self.recent
            .borrow()
            .iter()
            .find(|e| *e.date() == self.today)
            .cloned()
    }

    fn status_lines(&self) -> Vec<Line<'static>> {
        let status = match self.today_result() {
            Some(e) if *e.is_completed() => Line::styled(
                format!(
                    "Completed: {} points in {} ({} moves)",
                    e.score(),
                    format_time((*e.time_seconds()).max(0) as u64),
                    e.moves()
                ),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Some(_) => Line::styled(
                "Attempted but not finished. Try again!",
                Style::default().fg(Color::Yellow),
            ),
            None => Line::from("Not played yet. Press Enter to start."),
        };
        vec![
            Line::from(format!(
                "{}: {} pairs, same deal for everyone",
                self.today,
                DAILY_DIFFICULTY.pair_count()
            )),
            status,
            Line::from(format!(
                "Current streak: {} day(s)   Total completed: {}",
                self.streak, self.completed_count
            )),
        ]
    }
}

impl Screen for DailyChallengeScreen {
    #[instrument(skip(self, frame, _service))]
    fn render(&self, frame: &mut Frame, _service: &GameService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(widgets::title("Daily Challenge"), chunks[0]);

        let status = Paragraph::new(self.status_lines())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Today"));
        frame.render_widget(status, chunks[1]);

        let header = Row::new(
            ["Date", "Result", "Score", "Time", "Moves"]
                .into_iter()
                .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .style(Style::default().fg(Color::Yellow));
        let rows: Vec<Row> = self
            .recent
            .borrow()
            .iter()
            .map(|e| {
                let (result, color) = if *e.is_completed() {
                    ("cleared", Color::Green)
                } else {
                    ("failed", Color::Red)
                };
                Row::new(vec![
                    Cell::from(e.date().to_string()),
                    Cell::from(result).style(Style::default().fg(color)),
                    Cell::from(e.score().to_string()),
                    Cell::from(format_time((*e.time_seconds()).max(0) as u64)),
                    Cell::from(e.moves().to_string()),
                ])
            })
            .collect();
        let widths = [
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Recent days"));
        frame.render_widget(table, chunks[2]);

        frame.render_widget(
            widgets::help("Enter: Play today's challenge | Esc / b: Back | q: Quit"),
            chunks[3],
        );
    }

    #[instrument(skip(self, key, _service))]
    fn handle_key(&mut self, key: KeyEvent, _service: &GameService) -> ScreenTransition {
        match key.code {
            KeyCode::Enter => {
                info!(date = %self.today, "Starting daily challenge");
                ScreenTransition::StartDaily
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                ScreenTransition::GoToMainMenu
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
