//! Terminal UI module using ratatui.
//!
//! This module provides an interactive terminal interface for monitoring
//! temperature readings with a live readout, statistics, the log table and
//! a history chart.

pub mod app;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::{App, AppCommand};
pub use input::handle_input;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
};

use crate::monitor::MonitorSession;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App, session: &MonitorSession) {
    let area = frame.area();
    let theme = app.theme;
    frame.render_widget(Block::default().style(theme.base()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(rows[1]);

    let tracker = session.tracker();
    let port = session.source_name();

    widgets::render_readout(frame, top[0], theme, app.current.as_ref(), app.state);
    widgets::render_statistics(
        frame,
        top[1],
        theme,
        app.statistics.as_ref(),
        app.log.len(),
        app.overheat_threshold,
    );
    widgets::render_log_table(frame, middle[0], theme, &app.log, app.highlighted_row());
    widgets::render_chart(
        frame,
        middle[1],
        theme,
        tracker.history(),
        tracker.statistics(),
        app.overheat_threshold,
    );
    widgets::render_status_bar(
        frame,
        rows[2],
        theme,
        port.as_deref(),
        app.alerts_raised,
        app.status_message.as_deref(),
        app.error_message.as_deref(),
    );

    if app.show_help {
        widgets::render_help(frame, centered_rect(60, 70, area), theme);
    }

    if let Some(dialog) = &app.dialog {
        widgets::render_dialog(frame, centered_rect(50, 30, area), theme, dialog);
    }

    if let Some(input) = &app.prompt {
        widgets::render_export_prompt(frame, centered_rect(60, 25, area), theme, input);
    }
}

/// A rectangle of the given percentage size, centred in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
