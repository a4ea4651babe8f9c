//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// Render the status bar
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    theme: Theme,
    source: Option<&str>,
    alerts_raised: usize,
    status_message: Option<&str>,
    error_message: Option<&str>,
) {
    let mut spans = vec![];

    // Reader status
    match source {
        Some(port) => spans.push(Span::styled(
            format!("READING {}", port),
            Style::default().fg(theme.ok()).add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled(
            "READER INACTIVE",
            Style::default().fg(theme.alert()).add_modifier(Modifier::BOLD),
        )),
    }

    spans.push(Span::raw(" │ "));

    let alert_color = if alerts_raised > 0 {
        theme.alert()
    } else {
        theme.muted()
    };
    spans.push(Span::styled(
        format!("Alerts: {}", alerts_raised),
        Style::default().fg(alert_color),
    ));

    // Error message takes priority
    if let Some(error) = error_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("ERROR: {}", error),
            Style::default().fg(theme.alert()).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(status) = status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(status, Style::default().fg(theme.muted())));
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled("? help", Style::default().fg(theme.muted())));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted()))
        .style(theme.panel());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
