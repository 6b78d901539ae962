use tonelab_dsp::{
    dequantize, design_and_apply, generate, magnitude_spectrum, quantize, read_wav, write_wav,
    ClipConfig, FilterMode, FilterSpec, Waveform,
};

#[test]
fn default_scenario_renders_a_clean_filtered_sine() {
    // The workbench defaults: 440 Hz sine through a 500 Hz low-pass.
    let config = ClipConfig::default();
    let (time_axis, raw) = generate(Waveform::Sine, 440.0, &config);
    assert_eq!(raw.len(), 44_100);
    assert_eq!(time_axis.len(), 44_100);

    let spec = FilterSpec::new(FilterMode::LowPass, 500.0, 2000.0);
    let filtered = design_and_apply(&raw, &spec, config.sample_rate).unwrap();
    assert_eq!(filtered.len(), raw.len());
    assert!(filtered.iter().all(|s| s.abs() <= 1.01));

    // 440 Hz sits just inside the 500 Hz knee: about 1 dB of droop,
    // nothing more. The dominant bin stays put.
    let spectrum = magnitude_spectrum(&filtered, config.sample_rate);
    let dominant = spectrum.dominant_frequency_hz();
    assert!(
        (dominant - 440.0).abs() < 1.0,
        "dominant frequency drifted to {dominant} Hz"
    );
    let fundamental = spectrum.magnitude_near_hz(440.0);
    assert!(
        fundamental > 0.85 && fundamental < 0.95,
        "expected ~1 dB of droop at 440 Hz, got magnitude {fundamental}"
    );

    // Nothing above 1 kHz within 40 dB of the fundamental: a filtered
    // sine puts no energy up there unless the recursion went unstable.
    let first_high_bin = (1000.0 / spectrum.bin_width_hz()).round() as usize;
    let ceiling = spectrum.magnitudes()[first_high_bin..]
        .iter()
        .fold(0.0f64, |m, &x| m.max(x));
    assert!(
        ceiling < fundamental / 100.0,
        "high-band magnitude {ceiling} is within 40 dB of the fundamental"
    );
}

#[test]
fn band_pass_reshapes_a_square_to_its_in_band_harmonic() {
    // A 440 Hz square has harmonics at 440, 1320, 2200, .. Hz falling
    // off as 1/k. An 800..2000 Hz band rejects the fundamental and
    // keeps the third harmonic, so the dominant bin moves there.
    let config = ClipConfig::default();
    let (_, raw) = generate(Waveform::Square, 440.0, &config);
    let spec = FilterSpec::new(FilterMode::BandPass, 800.0, 2000.0);
    let filtered = design_and_apply(&raw, &spec, config.sample_rate).unwrap();

    let dominant = magnitude_spectrum(&filtered, config.sample_rate).dominant_frequency_hz();
    assert!(
        (dominant - 1320.0).abs() < 1.0,
        "expected the third harmonic to dominate, got {dominant} Hz"
    );
}

#[test]
fn unfiltered_square_hits_the_pcm_rails_exactly() {
    let config = ClipConfig::default();
    let (_, raw) = generate(Waveform::Square, 440.0, &config);
    let spec = FilterSpec::new(FilterMode::None, 500.0, 2000.0);
    let passthrough = design_and_apply(&raw, &spec, config.sample_rate).unwrap();
    assert_eq!(passthrough, raw, "mode none must be bit-for-bit identity");

    let pcm = quantize(&passthrough);
    assert!(pcm.iter().all(|&s| s == 32_767 || s == -32_767));
}

#[test]
fn exported_wav_round_trips_within_one_quantization_step() {
    // Two renders: a low-passed sine that stays inside [-1, 1], and a
    // low-passed sawtooth whose ringing overshoots the rails, so the
    // round trip covers both sides of the clamp.
    let cases = [
        (Waveform::Sine, 1000.0),
        (Waveform::Sawtooth, 2000.0),
    ];
    let config = ClipConfig::default();
    let path = std::env::temp_dir().join("tonelab_regression_round_trip.wav");

    for (waveform, low_cutoff) in cases {
        let (_, raw) = generate(waveform, 440.0, &config);
        let spec = FilterSpec::new(FilterMode::LowPass, low_cutoff, 2000.0);
        let filtered = design_and_apply(&raw, &spec, config.sample_rate).unwrap();

        write_wav(&path, &quantize(&filtered), config.sample_rate).unwrap();
        let (pcm, rate) = read_wav(&path).unwrap();

        assert_eq!(rate, config.sample_rate);
        assert_eq!(pcm.len(), filtered.len());

        let restored = dequantize(&pcm);
        for (i, (&original, &returned)) in filtered.iter().zip(&restored).enumerate() {
            let clamped = original.clamp(-1.0, 1.0);
            assert!(
                (clamped - returned).abs() <= 1.0 / 32_767.0,
                "{waveform:?} sample {i} moved from {clamped} to {returned}"
            );
        }
    }
    std::fs::remove_file(&path).ok();
}
