//! Layout components (screen areas, status bar)

use crate::app::App;
use crate::platform::{COPY_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Height of the response panel including borders
const RESPONSE_HEIGHT: u16 = 6;

/// Width of the echo column
const ECHO_WIDTH: u16 = 40;

/// Screen regions for the single view
pub struct ScreenAreas {
    pub form: Rect,
    pub echo: Rect,
    pub response: Rect,
    pub status: Rect,
}

/// Split the screen into form | echo on top, response below, status bar last
pub fn create_layout(area: Rect) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                  // Form and echo
            Constraint::Length(RESPONSE_HEIGHT), // Response
            Constraint::Length(1),               // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(ECHO_WIDTH)])
        .split(rows[0]);

    ScreenAreas {
        form: columns[0],
        echo: columns[1],
        response: rows[1],
        status: rows[2],
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" POST ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(app.endpoint.as_str(), Style::default().fg(Color::White)),
        Span::raw(" | "),
        Span::styled(key_hints(), Style::default().fg(Color::Gray)),
    ];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

fn key_hints() -> String {
    format!("{SUBMIT_SHORTCUT}:create  {COPY_SHORTCUT}:copy link  ^Q:quit")
}
