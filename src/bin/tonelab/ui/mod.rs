//! TUI for the workbench
//!
//! Single-shot visualization: every chart redraws from the finished
//! clip, so what you see is exactly what plays and what saves.

mod controls;
mod spectrum;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::Workbench;

use controls::render_controls;
use spectrum::render_spectrum;
use waveform::render_waveform;

/// Render one frame of the workbench.
pub fn render(frame: &mut Frame, workbench: &Workbench) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Controls + status
            Constraint::Min(8),     // Waveform
            Constraint::Length(10), // Spectrum
            Constraint::Length(1),  // Help bar
        ])
        .split(frame.area());

    render_controls(frame, chunks[0], workbench);
    render_waveform(frame, chunks[1], workbench);
    render_spectrum(frame, chunks[2], &workbench.spectrum);

    let help = Paragraph::new(
        " [W] Shape  [F] Filter  [←/→] Freq  [[/]] Low  [{/}] High  [P] Play  [S] Save  [R] Reset  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
