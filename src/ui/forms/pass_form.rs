//! Pass creation form rendering

use super::field_renderer::{draw_field, draw_field_compact, draw_help_text};
use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FieldName, FormButton, BUTTONS_ROW};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the address textarea including borders
const ADDRESS_HEIGHT: u16 = 5;

/// Rows needed by the bordered layout, help text excluded
const FULL_HEIGHT: u16 = 3 * 4 + ADDRESS_HEIGHT + BUTTON_HEIGHT;

/// Draw the five inputs and the buttons row
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" New Wallet Pass ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height >= FULL_HEIGHT {
        draw_bordered(frame, inner, app);
    } else {
        draw_compact(frame, inner, app);
    }
}

fn draw_bordered(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Plan
            Constraint::Length(3),              // Company name
            Constraint::Length(3),              // IBAN
            Constraint::Length(3),              // BIC
            Constraint::Length(ADDRESS_HEIGHT), // Address
            Constraint::Length(BUTTON_HEIGHT),  // Buttons
            Constraint::Min(0),                 // Help
        ])
        .split(area);

    for name in FieldName::ALL {
        let is_active = form.active_name() == Some(name);
        draw_field(frame, chunks[name.index()], form.field(name), is_active);
    }

    draw_buttons(frame, chunks[BUTTONS_ROW], app);

    let submit_hint = format!("{SUBMIT_SHORTCUT}: create pass   {RESET_SHORTCUT}: clear form");
    draw_help_text(
        frame,
        chunks[BUTTONS_ROW + 1],
        &["Tab/Shift+Tab: move between fields", submit_hint.as_str()],
    );
}

/// One row per input and one for the buttons, for short terminals
fn draw_compact(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;

    let mut constraints = [Constraint::Length(1); BUTTONS_ROW + 2];
    constraints[BUTTONS_ROW + 1] = Constraint::Min(0);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for name in FieldName::ALL {
        let is_active = form.active_name() == Some(name);
        draw_field_compact(frame, rows[name.index()], form.field(name), is_active);
    }

    let row_active = form.is_buttons_row_active();
    let spans: Vec<Span> = buttons()
        .into_iter()
        .flat_map(|(button, accent)| {
            let style = if row_active && form.selected_button == button {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            [
                Span::styled(format!("[ {} ]", button_label(app, button)), style),
                Span::raw(" "),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[BUTTONS_ROW]);
}

fn buttons() -> [(FormButton, Color); 2] {
    [
        (FormButton::Create, Color::Green),
        (FormButton::Reset, Color::Gray),
    ]
}

fn button_label(app: &App, button: FormButton) -> &'static str {
    match button {
        FormButton::Create if app.state.response.is_pending() => "Sending",
        _ => button.label(),
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let row_active = form.is_buttons_row_active();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);

    for (slot, (button, accent)) in buttons().into_iter().enumerate() {
        render_action_button(
            frame,
            columns[slot],
            button_label(app, button),
            row_active && form.selected_button == button,
            accent,
        );
    }
}
