//! tonelab - terminal workbench for shaping and auditioning test tones
//!
//! Run with: cargo run

mod app;
mod ui;

use app::Workbench;
use tonelab_dsp::CpalSink;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut terminal = ratatui::init();
    let result = Workbench::new(Box::new(CpalSink::new())).run(&mut terminal);
    ratatui::restore();
    result
}
