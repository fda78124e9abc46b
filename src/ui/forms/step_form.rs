//! Input steps of the wizard (contact, move details, addresses)

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{FieldId, WizardStep};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the inputs of the current step
pub fn draw_step_form(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.state.step;
    let border_color = if app.state.is_pending() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .title(format!(" {} ", step.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = app.state.step_fields();
    if step == WizardStep::Addresses {
        // Origin on the left, destination on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);
        let (origin, destination) = fields.split_at(fields.len() / 2);
        draw_column(frame, columns[0], app, origin);
        draw_column(frame, columns[1], app, destination);
    } else {
        draw_column(frame, inner, app, fields);
    }
}

/// Stack fields vertically; multiline fields take the remaining space
fn draw_column(frame: &mut Frame, area: Rect, app: &App, ids: &[FieldId]) {
    let mut constraints: Vec<Constraint> = ids
        .iter()
        .map(|id| {
            if app.state.form.field(*id).is_multiline {
                Constraint::Min(FIELD_HEIGHT + 2)
            } else {
                Constraint::Length(FIELD_HEIGHT)
            }
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let active = app.state.active_field();
    for (id, chunk) in ids.iter().zip(chunks.iter()) {
        draw_field(
            frame,
            *chunk,
            app.state.form.field(*id),
            active == Some(*id) && !app.state.is_pending(),
            app.state.errors.get(id).map(String::as_str),
        );
    }
}
