//! The keypress-to-clip path: synthesize, filter, quantize.

use std::hint::black_box;

use criterion::Criterion;
use tonelab_dsp::{
    design_and_apply, generate, quantize, ClipConfig, FilterMode, FilterSpec, Waveform,
};

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");
    let config = ClipConfig::default();

    for (name, waveform, mode) in [
        ("sine_lowpass", Waveform::Sine, FilterMode::LowPass),
        ("square_bandpass", Waveform::Square, FilterMode::BandPass),
        ("sawtooth_none", Waveform::Sawtooth, FilterMode::None),
    ] {
        let spec = FilterSpec::new(mode, 500.0, 2_000.0);
        group.bench_function(name, |b| {
            b.iter(|| {
                let (_, raw) = generate(black_box(waveform), black_box(440.0), &config);
                let filtered = design_and_apply(&raw, &spec, config.sample_rate).unwrap();
                quantize(black_box(&filtered))
            })
        });
    }

    group.finish();
}
