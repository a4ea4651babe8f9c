//! Modal dialogs: overheat alert, session error and the export prompt.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::app::Dialog;
use crate::ui::theme::Theme;

pub fn render_dialog(frame: &mut Frame, area: Rect, theme: Theme, dialog: &Dialog) {
    frame.render_widget(Clear, area);

    let (title, message) = match dialog {
        Dialog::Alert(text) => (" ⚠ Alert ", text.as_str()),
        Dialog::Error(text) => (" Error ", text.as_str()),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(theme.alert())
                .add_modifier(Modifier::BOLD),
        )
        .style(theme.base());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc to close",
            Style::default().fg(theme.muted()),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

pub fn render_export_prompt(frame: &mut Frame, area: Rect, theme: Theme, input: &str) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Export CSV ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight()))
        .style(theme.base());

    let lines = vec![
        Line::from(Span::styled(
            "Destination file:",
            Style::default().fg(theme.muted()),
        )),
        Line::from(vec![
            Span::raw(input),
            Span::styled("▏", Style::default().fg(theme.highlight())),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to save, Esc to cancel",
            Style::default().fg(theme.muted()),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
