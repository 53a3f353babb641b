//! Game over screen: score breakdown and what the result earned.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, instrument};

use crate::game::format_time;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::widgets;
use crate::{GameReport, GameService};

/// State for the results screen.
#[derive(Debug)]
pub struct GameOverScreen {
    report: GameReport,
}

impl GameOverScreen {
    /// Creates the results screen for a recorded game.
    #[instrument(skip(report))]
    pub fn new(report: GameReport) -> Self {
        debug!(total = report.score().total_score, "Initializing GameOverScreen");
        Self { report }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let r = &self.report;
        let score = r.score();
        let mut lines = vec![
            Line::from(format!("Time:        {}", format_time(*r.elapsed_secs()))),
            Line::from(format!("Moves:       {}", r.moves())),
            Line::from(""),
            Line::from(format!("Pairs found: {:>6}", score.base_points)),
            Line::from(format!("Time bonus:  {:>6}", score.time_bonus)),
            Line::from(format!("Move bonus:  {:>6}", score.move_bonus)),
            Line::styled(
                format!("Total:       {:>6}", score.total_score),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
        ];
        if *r.new_best_score() {
            lines.push(Line::styled(
                "New best score!",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        if *r.on_leaderboard() {
            lines.push(Line::styled(
                "You made the leaderboard!",
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(daily) = r.daily() {
            let text = if *daily.is_completed() {
                format!("Daily challenge for {} complete", daily.date())
            } else {
                format!("Daily challenge for {} not finished yet", daily.date())
            };
            lines.push(Line::from(text));
        }
        lines
    }
}

impl Screen for GameOverScreen {
    #[instrument(skip(self, frame, _service))]
    fn render(&self, frame: &mut Frame, _service: &GameService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let heading = if *self.report.completed() {
            "Board Cleared!"
        } else {
            "Time's Up"
        };
        frame.render_widget(widgets::title(heading), chunks[0]);

        let body = Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Results"));
        frame.render_widget(body, chunks[1]);

        frame.render_widget(
            widgets::help("n: New Game | Enter / Esc: Menu | q: Quit"),
            chunks[2],
        );
    }

    #[instrument(skip(self, key, _service))]
    fn handle_key(&mut self, key: KeyEvent, _service: &GameService) -> ScreenTransition {
        match key.code {
            KeyCode::Char('n') | KeyCode::Char('N') => ScreenTransition::StartGame,
            KeyCode::Enter | KeyCode::Esc => ScreenTransition::GoToMainMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
