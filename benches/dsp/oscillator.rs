//! Benchmarks for closed-form waveform synthesis.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tonelab_dsp::{generate, ClipConfig, Waveform};

use crate::CLIP_LENGTHS;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &len in CLIP_LENGTHS {
        let config = ClipConfig::new(44_100, len as f64 / 44_100.0);
        for waveform in [Waveform::Sine, Waveform::Square, Waveform::Sawtooth] {
            let name = waveform.name().to_ascii_lowercase();
            group.bench_with_input(BenchmarkId::new(name, len), &len, |b, _| {
                b.iter(|| generate(black_box(waveform), black_box(440.0), &config))
            });
        }
    }

    group.finish();
}
