//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::theme::Theme;

fn shortcut(keys: &'static str, description: &'static str, theme: Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", keys), Style::default().fg(theme.border())),
        Span::raw(description),
    ])
}

fn heading(text: &'static str, theme: Theme) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.highlight())
            .add_modifier(Modifier::BOLD),
    ))
}

/// Render the help panel
pub fn render_help(frame: &mut Frame, area: Rect, theme: Theme) {
    // Clear the area first
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight()))
        .style(theme.base());

    let help_text = vec![
        Line::from(""),
        heading("Log table", theme),
        shortcut("↑/k  ↓/j", "Scroll one row", theme),
        shortcut("PgUp PgDn", "Scroll one page", theme),
        shortcut("Home/g", "First reading", theme),
        shortcut("End/G", "Follow newest reading", theme),
        Line::from(""),
        heading("Controls", theme),
        shortcut("e", "Export the log table as CSV", theme),
        shortcut("t", "Toggle light/dark theme", theme),
        shortcut("Enter/Esc", "Close alert or error dialog", theme),
        Line::from(""),
        heading("Other", theme),
        shortcut("?/h/F1", "Toggle this help", theme),
        shortcut("q/Esc", "Quit application", theme),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(
                "?",
                Style::default()
                    .fg(theme.border())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to close this help"),
        ]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
