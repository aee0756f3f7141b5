//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Used for both the title and the border
    pub color: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Hint shown at the bottom (e.g., "Press Enter to dismiss")
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let padding = 4u16;
    let wrapped = wrap_text(
        config.message,
        config.max_width.saturating_sub(padding + 2) as usize,
    );

    let hint_width: usize = config
        .hint
        .iter()
        .flatten()
        .map(|span| span.content.chars().count())
        .sum();
    let content_width = wrapped
        .iter()
        .map(|l| l.chars().count())
        .chain([config.title.chars().count(), hint_width])
        .max()
        .unwrap_or(0) as u16;
    let width = (content_width + padding + 2).min(config.max_width);

    let hint_lines = if config.hint.is_some() { 2 } else { 0 };
    let height = (2 + wrapped.len() as u16 + hint_lines + 2).max(5);

    let dialog_area = centered_rect(frame.area(), width, height);
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped.into_iter().map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint));
    }

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(config.color))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(dialog, dialog_area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Greedy word wrap; explicit newlines always break
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if needed > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("invalid: iban", 40), vec!["invalid: iban"]);
    }

    #[test]
    fn test_wrap_long_text() {
        assert_eq!(
            wrap_text("could not copy the download link", 12),
            vec!["could not", "copy the", "download", "link"]
        );
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(area, 60, 5), Rect::new(0, 2, 20, 5));
        assert_eq!(centered_rect(area, 10, 4), Rect::new(5, 3, 10, 4));
    }
}
