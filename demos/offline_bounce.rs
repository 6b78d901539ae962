//! Renders one clip per shape and filter mode straight to wav files,
//! no terminal UI involved.
//!
//! Run with: cargo run --example offline_bounce

use std::path::Path;

use tonelab_dsp::{
    clip_filename, design_and_apply, generate, quantize, write_wav, ClipConfig, FilterMode,
    FilterSpec, Waveform,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = ClipConfig::default();
    for waveform in [Waveform::Sine, Waveform::Square, Waveform::Sawtooth] {
        for mode in FilterMode::ALL {
            let (_, raw) = generate(waveform, 440.0, &config);
            let spec = FilterSpec::new(mode, 500.0, 2_000.0);
            let filtered = design_and_apply(&raw, &spec, config.sample_rate)?;
            let name = clip_filename(waveform, mode);
            write_wav(Path::new(&name), &quantize(&filtered), config.sample_rate)?;
            println!("Rendered {name}");
        }
    }
    Ok(())
}
