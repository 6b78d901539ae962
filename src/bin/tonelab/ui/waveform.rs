//! Waveform chart widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::Workbench;

/// How much of the clip the chart shows. A full second of 44.1 kHz
/// audio is solid ink at terminal resolution; the first 1000 samples
/// (~23 ms) show a handful of cycles instead.
const PLOT_SAMPLES: usize = 1000;

/// Render the leading edge of the filtered clip.
pub fn render_waveform(frame: &mut Frame, area: Rect, workbench: &Workbench) {
    let data: Vec<(f64, f64)> = workbench
        .time_axis
        .iter()
        .zip(&workbench.filtered)
        .take(PLOT_SAMPLES)
        .map(|(&t, &y)| (t as f64, y as f64))
        .collect();

    let title = format!(
        " {} Wave ({}) ",
        workbench.waveform.name(),
        workbench.filter.mode.label()
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let max_t = data.last().map(|&(t, _)| t).unwrap_or(1.0).max(1e-6);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_t])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            // A touch of headroom so clipped flat tops at exactly
            // +/-1.0 stay visible instead of hugging the frame.
            Axis::default()
                .bounds([-1.1, 1.1])
                .labels(vec!["-1", "0", "+1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
