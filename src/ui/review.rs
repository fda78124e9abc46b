//! Review step: summary of the answers and the estimated price

use crate::app::App;
use crate::pricing::format_price;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the review step
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Summary
            Constraint::Length(6), // Estimate
        ])
        .split(area);

    draw_summary(frame, chunks[0], app);
    draw_estimate(frame, chunks[1], app);
}

fn draw_summary(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let move_type = form
        .selected_move_type()
        .map(|m| m.label())
        .unwrap_or_default();

    let mut lines = vec![
        summary_line("Name", form.name.as_text()),
        summary_line("E-mail", form.email.as_text()),
        summary_line("Phone", form.phone.as_text()),
        summary_line("Date", form.date.as_text()),
        summary_line("Type", move_type),
        summary_line("Origin", &form.origin_display()),
        summary_line("Destination", &form.destination_display()),
    ];
    if !form.description.is_blank() {
        lines.push(summary_line("Details", form.description.as_text()));
    }

    let block = Block::default()
        .title(" Review your details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn summary_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), Style::default().fg(Color::Gray)),
    ])
}

fn draw_estimate(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Estimated price ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let lines = match &app.state.estimate {
        Some(estimate) => vec![
            Line::from(Span::styled(
                format!(" {}", format_price(estimate.price)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    " {:.1} km · {} · {}{}",
                    estimate.distance_km,
                    estimate.inputs.property_type.label(),
                    estimate.inputs.item_volume.label(),
                    if estimate.inputs.has_helpers {
                        " · with helpers"
                    } else {
                        ""
                    }
                ),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                " Non-binding estimate",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from(Span::styled(
            " No estimate available",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
