//! Chart widget for displaying the temperature history.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use crate::monitor::{Reading, Statistics};
use crate::ui::theme::Theme;

/// Render every reading of the session against the overheat threshold
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    theme: Theme,
    history: &[Reading],
    stats: Option<Statistics>,
    threshold: f64,
) {
    let block = Block::default()
        .title(" Temperature History ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border()))
        .style(theme.panel());

    let Some(stats) = stats.filter(|_| !history.is_empty()) else {
        let chart = Chart::new(vec![])
            .block(block)
            .x_axis(Axis::default().title("Samples").bounds([0.0, 1.0]))
            .y_axis(Axis::default().title("°C").bounds([0.0, threshold.max(1.0)]));
        frame.render_widget(chart, area);
        return;
    };

    let data_len = stats.count;
    let readings: Vec<(f64, f64)> = history
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.value))
        .collect();
    let x_max = (data_len.saturating_sub(1)).max(1) as f64;
    let threshold_line = [(0.0, threshold), (x_max, threshold)];

    // Keep the threshold visible and leave a margin around the data
    let y_min = stats.min.min(threshold) - 1.0;
    let y_max = stats.max.max(threshold) + 1.0;

    let datasets = vec![
        Dataset::default()
            .name("Reading")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.highlight()))
            .data(&readings),
        Dataset::default()
            .name("Threshold")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.alert()))
            .data(&threshold_line),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Samples")
                .style(Style::default().fg(theme.muted()))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .title("°C")
                .style(Style::default().fg(theme.muted()))
                .bounds([y_min, y_max])
                .labels(vec![
                    format!("{:.1}", y_min),
                    format!("{:.1}", threshold),
                    format!("{:.1}", y_max),
                ]),
        );

    frame.render_widget(chart, area);
}
