//! Plays one filtered tone through the default output device.
//!
//! Run with: cargo run --example play_tone

use tonelab_dsp::{
    design_and_apply, generate, quantize, AudioSink, ClipConfig, CpalSink, FilterMode, FilterSpec,
    Waveform,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = ClipConfig::default();
    let (_, raw) = generate(Waveform::Sawtooth, 220.0, &config);
    let spec = FilterSpec::new(FilterMode::LowPass, 1_000.0, 2_000.0);
    let filtered = design_and_apply(&raw, &spec, config.sample_rate)?;

    println!(
        "Playing a {:.1} s low-passed sawtooth at 220 Hz",
        config.duration_secs
    );
    CpalSink::new().play(&quantize(&filtered), config.sample_rate)?;
    Ok(())
}
