//! Layout components (header, footer, status bar)

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::WizardStep;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, body and footer, reserving the last row for
/// the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title + progress
            Constraint::Min(0),                // Step content
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the title and the step progress bar
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.state.step;
    let segment_width = (area.width.saturating_sub(2) as usize / WizardStep::COUNT).max(1);

    let mut progress = vec![Span::raw(" ")];
    progress.extend(WizardStep::ALL.iter().map(|s| {
        let color = if s.number() <= step.number() {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        Span::styled(
            "━".repeat(segment_width.saturating_sub(1)) + " ",
            Style::default().fg(color),
        )
    }));

    let lines = vec![
        Line::from(Span::styled(
            " Let's get started!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(progress),
        Line::from(Span::styled(
            format!(
                " Step {} of {}: {}",
                step.number(),
                WizardStep::COUNT,
                step.label()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw the Back / Continue buttons
pub fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Back
            Constraint::Min(0),     // spacer
            Constraint::Length(28), // Primary
        ])
        .split(area);

    let step = app.state.step;
    let pending = app.state.is_pending();

    if !matches!(step, WizardStep::Contact | WizardStep::Confirmation) {
        render_button(frame, chunks[0], "Esc Back", false, true);
    }

    let primary = match step {
        WizardStep::Review => "Enter Confirm",
        WizardStep::Confirmation => "Enter Start over",
        _ if pending => "Looking up addresses...",
        _ => "Enter Continue",
    };
    render_button(frame, chunks[2], primary, true, !pending);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {}", get_step_hints(app.state.step)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    // Quit hint on the right
    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current step
fn get_step_hints(step: WizardStep) -> String {
    let restart = crate::platform::RESTART_SHORTCUT;
    match step {
        WizardStep::Contact => format!("Tab:next field  Enter:continue  {restart}:restart"),
        WizardStep::MoveDetails => format!(
            "Tab:next  ←/→:move type  {}:continue  Esc:back",
            crate::platform::CONTINUE_SHORTCUT
        ),
        WizardStep::Addresses => "Tab:next  Enter:look up & continue  Esc:back".to_string(),
        WizardStep::Review => format!("Enter:confirm  Esc:back  {restart}:restart"),
        WizardStep::Confirmation => "Enter:new quote".to_string(),
    }
}
