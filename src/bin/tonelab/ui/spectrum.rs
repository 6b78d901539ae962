//! Spectrum chart widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render the magnitude spectrum of the filtered clip.
///
/// Points arrive log-spaced in frequency, so the x axis plots
/// log10(Hz) to spread the octaves evenly; a filter skirt then reads
/// as a straight slope.
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let data: Vec<(f64, f64)> = spectrum
        .iter()
        .map(|&(freq, db)| (freq.max(1.0).log10(), db))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let (x_min, x_max) = match (data.first(), data.last()) {
        (Some(&(first, _)), Some(&(last, _))) => (first, last.max(first + 1e-6)),
        _ => (1.0, 4.5),
    };
    let max_db = spectrum.iter().map(|&(_, db)| db).fold(-100.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([x_min, x_max])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-120.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-120", "-60", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
