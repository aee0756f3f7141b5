//! Read-only echo of the current form values

use crate::state::PassForm;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// One line per field; continuation lines of the address are indented
pub fn echo_lines(form: &PassForm) -> Vec<Line<'static>> {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    for (name, value) in form.fields() {
        let mut parts = value.split('\n');
        let first = parts.next().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", name.label()), label_style),
            Span::raw(first.to_string()),
        ]));
        let indent = " ".repeat(name.label().len() + 2);
        for rest in parts {
            lines.push(Line::from(format!("{indent}{rest}")));
        }
    }

    lines
}

pub fn draw(frame: &mut Frame, area: Rect, form: &PassForm) {
    let paragraph = Paragraph::new(echo_lines(form))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Preview ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}
