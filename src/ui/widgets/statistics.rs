//! Min / max / average panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::monitor::StatisticsText;
use crate::ui::theme::Theme;

pub fn render_statistics(
    frame: &mut Frame,
    area: Rect,
    theme: Theme,
    stats: Option<&StatisticsText>,
    readings: usize,
    threshold: f64,
) {
    let block = Block::default()
        .title(" Statistics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border()))
        .style(theme.panel());

    let label = Style::default().fg(theme.muted());
    let value = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &'static str, text: Option<&str>| {
        Line::from(vec![
            Span::styled(format!("{:<10}", name), label),
            Span::styled(
                text.map(|t| format!("{}°C", t))
                    .unwrap_or_else(|| "--".to_string()),
                value,
            ),
        ])
    };

    let lines = vec![
        field("Min:", stats.map(|s| s.min.as_str())),
        field("Max:", stats.map(|s| s.max.as_str())),
        field("Average:", stats.map(|s| s.average.as_str())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Readings:"), label),
            Span::raw(readings.to_string()),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Alarm >"), label),
            Span::raw(format!("{}°C", threshold)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
