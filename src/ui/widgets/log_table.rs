//! Scrollable table of logged readings.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Row, Table, TableState},
};

use crate::export::CSV_HEADER;
use crate::monitor::LogEntry;
use crate::ui::theme::Theme;

/// Render the log table, keeping the highlighted row in view
pub fn render_log_table(
    frame: &mut Frame,
    area: Rect,
    theme: Theme,
    entries: &[LogEntry],
    highlighted: Option<usize>,
) {
    let block = Block::default()
        .title(format!(" Log ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border()))
        .style(theme.panel());

    let header = Row::new(CSV_HEADER.split(',').collect::<Vec<_>>()).style(
        Style::default()
            .fg(theme.highlight())
            .add_modifier(Modifier::BOLD),
    );

    let rows = entries
        .iter()
        .map(|entry| Row::new(vec![entry.time.as_str(), entry.temperature.as_str()]));

    let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(8)])
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    state.select(highlighted);
    frame.render_stateful_widget(table, area, &mut state);
}
