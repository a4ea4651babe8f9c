//! Live temperature readout and overheat status.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::monitor::{MonitorState, Reading};
use crate::ui::theme::Theme;

/// Render the current value and the Normal/Overheat label
pub fn render_readout(
    frame: &mut Frame,
    area: Rect,
    theme: Theme,
    current: Option<&Reading>,
    state: MonitorState,
) {
    let block = Block::default()
        .title(" Temperature ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border()))
        .style(theme.panel());

    let value = match current {
        Some(reading) => format!("{} °C", reading.value),
        None => "--".to_string(),
    };

    let (state_text, state_color) = match state {
        MonitorState::Normal => ("✅ Status: Normal".to_string(), theme.ok()),
        MonitorState::Overheat => (format!("⚠ Status: {}", state.label()), theme.alert()),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(theme.highlight())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            state_text,
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
