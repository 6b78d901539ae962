//! Benchmarks for Butterworth design and application.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tonelab_dsp::dsp::filter::{
    butterworth, design_and_apply, lfilter, Band, FilterMode, FilterSpec,
};

use crate::CLIP_LENGTHS;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    // Design alone: three pole layouts. Band-pass carries twice the
    // poles, so it should cost roughly twice the others.
    group.bench_function("design/lowpass", |b| {
        b.iter(|| butterworth(5, black_box(Band::Lowpass { cutoff: 500.0 / 22_050.0 })))
    });
    group.bench_function("design/highpass", |b| {
        b.iter(|| butterworth(5, black_box(Band::Highpass { cutoff: 2_000.0 / 22_050.0 })))
    });
    group.bench_function("design/bandpass", |b| {
        b.iter(|| {
            butterworth(
                5,
                black_box(Band::Bandpass {
                    low: 500.0 / 22_050.0,
                    high: 2_000.0 / 22_050.0,
                }),
            )
        })
    });

    // Application: one forward pass over a ramp.
    let coeffs = butterworth(
        5,
        Band::Lowpass {
            cutoff: 500.0 / 22_050.0,
        },
    )
    .unwrap();
    for &len in CLIP_LENGTHS {
        let input: Vec<f32> = (0..len)
            .map(|i| (i as f32 / len as f32) * 2.0 - 1.0)
            .collect();
        group.bench_with_input(BenchmarkId::new("lfilter", len), &len, |b, _| {
            b.iter(|| lfilter(black_box(&coeffs), black_box(&input)))
        });
    }

    // Design and apply fused, the way the workbench calls it.
    let spec = FilterSpec::new(FilterMode::BandPass, 500.0, 2_000.0);
    let clip: Vec<f32> = (0..44_100)
        .map(|i| (std::f32::consts::TAU * 440.0 * i as f32 / 44_100.0).sin())
        .collect();
    group.bench_function("design_and_apply/bandpass_one_second", |b| {
        b.iter(|| design_and_apply(black_box(&clip), black_box(&spec), 44_100))
    });

    group.finish();
}
