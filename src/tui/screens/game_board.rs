//! Game board screen: the card grid, clock and move counter.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tracing::{debug, error, info, instrument, warn};

use crate::game::{CardState, FlipOutcome, format_time};
use crate::session::{GameSession, SessionMode};
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::widgets;
use crate::GameService;

const CARD_WIDTH: u16 = 7;
const CARD_HEIGHT: u16 = 3;

/// State for an active game.
#[derive(Debug)]
pub struct GameBoardScreen {
    session: GameSession,
    cursor: usize,
    paused: bool,
    result_attempted: bool,
    message: Option<String>,
}

impl GameBoardScreen {
    /// Creates the board screen for a session.
    #[instrument(skip(session), fields(mode = ?session.mode()))]
    pub fn new(session: GameSession) -> Self {
        debug!("Initializing GameBoardScreen");
        Self {
            session,
            cursor: 0,
            paused: false,
            result_attempted: false,
            message: None,
        }
    }

    /// Moves the cursor one cell, staying on the grid.
    #[instrument(skip(self))]
    fn move_cursor(&mut self, key: KeyCode) {
        let columns = self.session.game().difficulty().columns();
        let len = self.session.game().cards().len();
        let (row, col) = (self.cursor / columns, self.cursor % columns);
        self.cursor = match key {
            KeyCode::Left if col > 0 => self.cursor - 1,
            KeyCode::Right if col + 1 < columns && self.cursor + 1 < len => self.cursor + 1,
            KeyCode::Up if row > 0 => self.cursor - columns,
            KeyCode::Down if self.cursor + columns < len => self.cursor + columns,
            _ => self.cursor,
        };
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.session.pause();
        } else {
            self.session.resume();
        }
        info!(paused = self.paused, "Pause toggled");
    }

    /// Records the finished session and moves to the results screen.
    ///
    /// On failure the board stays up with the error so the player can retry.
    #[instrument(skip(self, service))]
    fn finish(&mut self, service: &GameService) -> ScreenTransition {
        self.result_attempted = true;
        match service.record_finished(&self.session) {
            Ok(report) => ScreenTransition::GoToGameOver(Box::new(report)),
            Err(e) => {
                error!(error = %e, "Failed to record finished game");
                self.message = Some(format!(
                    "Could not save result: {} | Enter: Retry | Esc: Menu",
                    e.message
                ));
                ScreenTransition::Stay
            }
        }
    }

    /// Saves progress and returns to the menu.
    ///
    /// A session that is over is recorded instead, unless recording it
    /// has already been tried.
    #[instrument(skip(self, service))]
    fn leave(&mut self, service: &GameService) -> ScreenTransition {
        if self.session.is_over() {
            if !self.result_attempted {
                return self.finish(service);
            }
            return ScreenTransition::GoToMainMenu;
        }
        if let Err(e) = service.save_progress(&self.session) {
            warn!(error = %e, "Failed to save progress");
        }
        ScreenTransition::GoToMainMenu
    }

    fn header_line(&self) -> Line<'_> {
        let game = self.session.game();
        let mut spans = vec![
            Span::raw(format!(
                "Pairs {}/{}   Moves {}   ",
                game.matched_pairs(),
                game.pair_count(),
                game.moves()
            )),
        ];
        match (self.session.remaining_secs(), self.session.feedback()) {
            (Some(remaining), Some(feedback)) => spans.push(Span::styled(
                format!("Time left {}", format_time(remaining)),
                Style::default()
                    .fg(widgets::feedback_color(feedback))
                    .add_modifier(Modifier::BOLD),
            )),
            _ => spans.push(Span::raw(format!(
                "Time {}",
                format_time(self.session.elapsed_secs())
            ))),
        }
        if self.paused {
            spans.push(Span::styled(
                "   PAUSED",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let game = self.session.game();
        let columns = game.difficulty().columns();
        let rows = game.cards().len().div_ceil(columns);
        let grid = widgets::center_rect(
            area,
            CARD_WIDTH * columns as u16,
            CARD_HEIGHT * rows as u16,
        );

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); rows])
            .split(grid);

        for (r, row_area) in row_areas.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Length(CARD_WIDTH); columns])
                .split(*row_area);
            for (c, cell) in cells.iter().enumerate() {
                let index = r * columns + c;
                if let Some(card) = game.cards().get(index) {
                    let (text, color) = match card.state() {
                        _ if self.paused => ("·".to_string(), Color::DarkGray),
                        CardState::Hidden => ("?".to_string(), Color::Blue),
                        CardState::Revealed => (card.glyph().to_string(), Color::Yellow),
                        CardState::Matched => (card.glyph().to_string(), Color::Green),
                    };
                    let mut block = Block::default().borders(Borders::ALL);
                    if index == self.cursor {
                        block = block
                            .border_type(BorderType::Thick)
                            .border_style(Style::default().fg(Color::Cyan));
                    }
                    let widget = Paragraph::new(text)
                        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                        .alignment(Alignment::Center)
                        .block(block);
                    frame.render_widget(widget, *cell);
                }
            }
        }
    }
}

impl Screen for GameBoardScreen {
    #[instrument(skip(self, frame, _service))]
    fn render(&self, frame: &mut Frame, _service: &GameService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = match self.session.mode() {
            SessionMode::Daily(date) => format!("Daily Challenge {}", date),
            SessionMode::Timed => format!("{} (timed)", self.session.game().difficulty().label()),
            SessionMode::Casual => self.session.game().difficulty().label().to_string(),
        };
        frame.render_widget(widgets::title(&title), chunks[0]);

        let header = Paragraph::new(self.header_line())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[1]);

        self.render_grid(frame, chunks[2]);

        let help_text = match &self.message {
            Some(m) => m.as_str(),
            None => "←↑↓→: Move | Enter/Space: Flip | p: Pause | Esc: Save & Menu",
        };
        frame.render_widget(widgets::help(help_text), chunks[3]);
    }

    #[instrument(skip(self, key, service))]
    fn handle_key(&mut self, key: KeyEvent, service: &GameService) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.leave(service),
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.toggle_pause();
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.session.is_over() => {
                self.finish(service)
            }
            _ if self.paused || self.session.is_over() => ScreenTransition::Stay,
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.move_cursor(key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.session.flip(self.cursor) {
                Ok(FlipOutcome::Completed { .. }) => self.finish(service),
                Ok(outcome) => {
                    debug!(?outcome, "Flip applied");
                    self.message = None;
                    ScreenTransition::Stay
                }
                Err(e) => {
                    debug!(error = %e, "Flip rejected");
                    self.message = Some(e.to_string());
                    ScreenTransition::Stay
                }
            },
            _ => ScreenTransition::Stay,
        }
    }

    fn tick(&mut self, delta: Duration, service: &GameService) -> ScreenTransition {
        if !self.session.is_over() {
            self.session.tick(delta);
        }
        // A resumed timed game can already be out of time before its first tick.
        if self.session.is_over() && !self.result_attempted {
            info!(status = ?self.session.status(), "Session over");
            return self.finish(service);
        }
        ScreenTransition::Stay
    }
}
