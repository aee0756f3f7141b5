//! Response panel rendering

use crate::state::{ResponseState, SubmissionOutcome};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Lines shown for the current response
pub fn response_lines(response: &ResponseState) -> Vec<Line<'static>> {
    let label = Span::styled("Response: ", Style::default().add_modifier(Modifier::BOLD));

    match response {
        ResponseState::Idle => vec![Line::from(label)],
        ResponseState::Pending { .. } => vec![Line::from(vec![
            label,
            Span::styled("Submitting...", Style::default().fg(Color::Yellow)),
        ])],
        ResponseState::Completed {
            outcome,
            completed_at,
        } => {
            let color = if outcome.is_success() {
                Color::Green
            } else {
                Color::Red
            };
            let mut lines = vec![Line::from(vec![
                label,
                Span::styled(outcome.message().to_string(), Style::default().fg(color)),
            ])];

            if let Some(url) = outcome.download_url() {
                lines.push(Line::from(vec![
                    Span::raw("Download pass: "),
                    Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
            }
            if let SubmissionOutcome::Success {
                pass_id: Some(id), ..
            } = outcome
            {
                lines.push(Line::from(format!("Pass ID: {id}")));
            }
            lines.push(Line::from(Span::styled(
                format!("at {}", completed_at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            )));
            lines
        }
    }
}

pub fn draw(frame: &mut Frame, area: Rect, response: &ResponseState) {
    let paragraph = Paragraph::new(response_lines(response))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Response ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RequestId;

    fn plain(response: &ResponseState) -> Vec<String> {
        response_lines(response)
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_idle() {
        assert_eq!(plain(&ResponseState::Idle), vec!["Response: "]);
    }

    #[test]
    fn test_pending() {
        let lines = plain(&ResponseState::Pending {
            request_id: RequestId(3),
        });
        assert_eq!(lines, vec!["Response: Submitting..."]);
    }

    #[test]
    fn test_success_with_link() {
        let lines = plain(&ResponseState::completed(SubmissionOutcome::Success {
            link: "passes/abc123".to_string(),
            message: "created".to_string(),
            pass_id: None,
        }));
        assert_eq!(lines[0], "Response: created");
        assert_eq!(lines[1], "Download pass: http://passes/abc123");
        assert!(lines[2].starts_with("at "));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_success_without_link_has_no_hyperlink() {
        let lines = plain(&ResponseState::completed(SubmissionOutcome::Success {
            link: String::new(),
            message: "created".to_string(),
            pass_id: Some("1b9d".to_string()),
        }));
        assert!(lines.iter().all(|l| !l.starts_with("Download pass")));
        assert!(lines.contains(&"Pass ID: 1b9d".to_string()));
    }

    #[test]
    fn test_failure() {
        let lines = plain(&ResponseState::completed(SubmissionOutcome::Failure {
            message: "invalid: iban".to_string(),
        }));
        assert_eq!(lines[0], "Response: invalid: iban");
        assert_eq!(lines.len(), 2);
    }
}
