//! Small widget builders shared by the screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::game::TimerFeedback;

/// Bold cyan title bar.
pub fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Dim key-binding hint bar.
pub fn help(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Colour for a countdown feedback level.
pub fn feedback_color(feedback: TimerFeedback) -> Color {
    match feedback {
        TimerFeedback::Normal => Color::Green,
        TimerFeedback::Warning => Color::Yellow,
        TimerFeedback::Critical | TimerFeedback::Expired => Color::Red,
    }
}

/// Centers a `width` × `height` rectangle inside `area`, clamped to fit.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
