//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a bordered text input; the active one gets a cursor and highlight
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let color = if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));

    let mut lines: Vec<Line> = if field.is_empty() {
        let placeholder = if is_active { "" } else { field.label.as_str() };
        vec![Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))]
    } else if field.is_multiline {
        field
            .as_text()
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect()
    } else {
        vec![Line::from(Span::styled(
            field.as_text().to_string(),
            Style::default().fg(if is_active { Color::White } else { Color::Gray }),
        ))]
    };

    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

/// Width of the label column in compact rows ("Company Name")
const COMPACT_LABEL_WIDTH: usize = 12;

/// Draw an input as a single `Label › value` row; newlines show as `⏎`
pub fn draw_field_compact(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let label_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(
            format!("{:>width$} › ", field.label, width = COMPACT_LABEL_WIDTH),
            label_style,
        ),
        Span::raw(field.as_text().replace('\n', " ⏎ ")),
    ];
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw dimmed help text lines
pub fn draw_help_text(frame: &mut Frame, area: Rect, lines: &[&str]) {
    let help: Vec<Line> = lines
        .iter()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::DarkGray))))
        .collect();
    frame.render_widget(Paragraph::new(help), area);
}
