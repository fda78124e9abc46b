//! Confirmation step

use crate::app::App;
use crate::pricing::format_price;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the confirmation screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("✔", Style::default().fg(Color::Green))),
        Line::from(""),
        Line::from(Span::styled(
            "All set!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Your quote request was sent and we will get back to you by e-mail."),
    ];

    if let Some(submission) = &app.state.submission {
        lines.push(Line::from(""));
        if let Some(estimate) = &submission.estimate {
            lines.push(Line::from(Span::styled(
                format!("Estimated price: {}", format_price(estimate.price)),
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("Reference: {}", submission.reference),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "Sent at {}",
                submission.submitted_at.format("%Y-%m-%d %H:%M UTC")
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
