//! Controls panel - current parameters, clip levels, and the status line

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use tonelab_dsp::FilterMode;

use crate::app::{Status, Workbench};

/// Peak and RMS of the finished clip.
pub struct LevelStats {
    pub peak: f32,
    pub rms: f32,
}

impl LevelStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let mut peak = 0.0f32;
        let mut energy = 0.0f64;
        for &sample in buffer {
            peak = peak.max(sample.abs());
            energy += f64::from(sample) * f64::from(sample);
        }
        let rms = (energy / buffer.len() as f64).sqrt() as f32;
        Self { peak, rms }
    }
}

/// Render the parameter readout and the status line below it.
pub fn render_controls(frame: &mut Frame, area: Rect, workbench: &Workbench) {
    let block = Block::default().title(" tonelab ").borders(Borders::ALL);
    let stats = LevelStats::from_buffer(&workbench.filtered);
    let mode = workbench.filter.mode;

    // Dim the cutoff knobs the current mode ignores.
    let low_active = matches!(mode, FilterMode::LowPass | FilterMode::BandPass);
    let high_active = matches!(mode, FilterMode::HighPass | FilterMode::BandPass);
    let knob = |active: bool| {
        Style::default().fg(if active { Color::White } else { Color::DarkGray })
    };

    let params = Line::from(vec![
        Span::styled(
            format!(" {} {:.0} Hz  ", workbench.waveform.name(), workbench.frequency_hz),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{}  ", mode.label()), Style::default().fg(Color::Green)),
        Span::styled(
            format!("low {:.0} Hz  ", workbench.filter.low_cutoff_hz),
            knob(low_active),
        ),
        Span::styled(
            format!("high {:.0} Hz  ", workbench.filter.high_cutoff_hz),
            knob(high_active),
        ),
        Span::styled(
            format!("{:.1} kHz  ", workbench.config.sample_rate as f32 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let status_style = match workbench.status {
        Status::Info(_) => Style::default().fg(Color::DarkGray),
        Status::Warning(_) => Style::default().fg(Color::Yellow),
        Status::Error(_) => Style::default().fg(Color::Red),
    };
    let status = Line::from(Span::styled(
        format!(" {}", workbench.status.text()),
        status_style,
    ));

    let paragraph = Paragraph::new(vec![params, status]).block(block);
    frame.render_widget(paragraph, area);
}
