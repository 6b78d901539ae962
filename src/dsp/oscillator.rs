use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::ClipConfig;

/*
Closed-Form Waveform Synthesis
==============================

Each clip is rendered by evaluating a periodic function directly at every
sample instant. There is no phase accumulator carried between samples: the
value at sample i depends only on t = i / sample_rate. That makes the
generator a pure function: rendering the same parameters twice produces
bit-identical buffers. The cost is one transcendental call per sample,
which is irrelevant for a one-second offline clip.

Shapes, with phase θ(t) = 2π·f·t:

  Sine      sin(θ)                     the fundamental alone, range [-1, 1]
  Square    +1 where sin(θ) ≥ 0,       odd harmonics falling off as 1/n,
            -1 elsewhere               every sample exactly ±1
  Sawtooth  2·fract(f·t) − 1           all harmonics falling off as 1/n,
                                       ramps -1 → +1 once per period and
                                       drops back at the boundary
  Silence   0                          the fail-open fallback shape

Aliasing: a naive square or sawtooth carries harmonics past any sample rate,
so frequencies near Nyquist (sample_rate / 2) fold back into the audible
band. The generator does not police this; the caller picks frequencies, and
an aliased render is still the deterministic, reproducible output for those
parameters.

Precision: the phase is computed in f64 and only the final amplitude is
narrowed to f32. At 2000 Hz the phase reaches 2000 cycles by the end of a
one-second clip; f32 phase would have drifted by a few hundredths of a cycle
there, while f64 keeps the error below one part in 10^12. The f32 narrowing
on store loses ~1e-7, well under the 1/32767 quantization step the clip ends
its life with.
*/

/// Waveform shape selector.
///
/// `Silence` renders an all-zero clip. Unrecognized shape names degrade
/// to it instead of erroring.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Silence,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Silence,
    ];

    /// Shape name as shown in chart titles and output filenames.
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Square => "Square",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Silence => "Silence",
        }
    }

    /// Parse a shape name, degrading unknown names to `Silence`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Sine" | "sine" => Waveform::Sine,
            "Square" | "square" => Waveform::Square,
            "Sawtooth" | "sawtooth" => Waveform::Sawtooth,
            _ => Waveform::Silence,
        }
    }
}

/// Render one clip of the given shape and frequency.
///
/// Returns the time axis (t_i = i / sample_rate, half-open: the sample at
/// t = duration is excluded) and the amplitude buffer, both of length
/// floor(sample_rate × duration).
///
/// Frequencies at or above Nyquist alias rather than error; see the module
/// notes.
pub fn generate(waveform: Waveform, frequency_hz: f32, config: &ClipConfig) -> (Vec<f32>, Vec<f32>) {
    let n = config.num_samples();
    let sample_rate = config.sample_rate as f64;
    let freq = frequency_hz as f64;

    let mut times = Vec::with_capacity(n);
    let mut samples = Vec::with_capacity(n);

    for i in 0..n {
        let t = i as f64 / sample_rate;
        let value = match waveform {
            Waveform::Sine => (TAU * freq * t).sin(),
            Waveform::Square => {
                if (TAU * freq * t).sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => {
                let cycles = freq * t;
                2.0 * (cycles - cycles.floor()) - 1.0
            }
            Waveform::Silence => 0.0,
        };
        times.push(t as f32);
        samples.push(value as f32);
    }

    (times, samples)
}

/// The time axis alone, for callers that already have a sample buffer.
pub fn time_axis(config: &ClipConfig) -> Vec<f32> {
    let sample_rate = config.sample_rate as f64;
    (0..config.num_samples())
        .map(|i| (i as f64 / sample_rate) as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ClipConfig {
        ClipConfig::new(44_100, 1.0)
    }

    #[test]
    fn valid_sine() {
        let config = test_config();
        let (_, samples) = generate(Waveform::Sine, 440.0, &config);

        // sample i should be sin(2pi f i / sr)
        let sample_index = 12;
        let expected = (TAU * 440.0 * sample_index as f64 / 44_100.0).sin() as f32;
        let actual = samples[sample_index];
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn every_shape_fills_the_whole_clip() {
        let config = test_config();
        for waveform in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Silence,
        ] {
            let (times, samples) = generate(waveform, 440.0, &config);
            assert_eq!(times.len(), 44_100, "{waveform:?} time axis length");
            assert_eq!(samples.len(), 44_100, "{waveform:?} sample count");
        }
    }

    #[test]
    fn time_axis_is_half_open() {
        let config = ClipConfig::new(100, 1.0);
        let times = time_axis(&config);
        assert_eq!(times.len(), 100);
        assert_eq!(times[0], 0.0);
        assert!((times[99] - 0.99).abs() < 1e-6, "last sample sits before t = duration");
    }

    #[test]
    fn sine_stays_in_unit_range() {
        let (_, samples) = generate(Waveform::Sine, 440.0, &test_config());
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn square_is_exactly_plus_or_minus_one() {
        for freq in [100.0, 440.0, 997.0, 2000.0] {
            let (_, samples) = generate(Waveform::Square, freq, &test_config());
            assert!(
                samples.iter().all(|&s| s == 1.0 || s == -1.0),
                "square at {freq} Hz produced an intermediate value"
            );
        }
    }

    #[test]
    fn square_spends_half_its_time_high() {
        let (_, samples) = generate(Waveform::Square, 441.0, &test_config());
        let high = samples.iter().filter(|&&s| s == 1.0).count();
        let ratio = high as f64 / samples.len() as f64;
        assert!(
            (ratio - 0.5).abs() < 0.01,
            "expected ~50% duty cycle, got {ratio}"
        );
    }

    #[test]
    fn sawtooth_rises_within_a_period_and_resets_once_per_period() {
        let freq = 100.0;
        let (_, samples) = generate(Waveform::Sawtooth, freq, &test_config());

        let mut resets = 0;
        for pair in samples.windows(2) {
            if pair[1] < pair[0] {
                // Period boundary: a full drop from near +1 back to near -1.
                assert!(
                    pair[0] - pair[1] > 1.9,
                    "reset should span the full range, got {} -> {}",
                    pair[0],
                    pair[1]
                );
                resets += 1;
            }
        }
        // 100 Hz over one second completes 100 periods; the ramp into the
        // final period ends at the buffer edge without a closing reset.
        assert!(
            resets == 99 || resets == 100,
            "expected one reset per period, got {resets}"
        );
    }

    #[test]
    fn sawtooth_starts_at_negative_one() {
        let (_, samples) = generate(Waveform::Sawtooth, 440.0, &test_config());
        assert_eq!(samples[0], -1.0);
    }

    #[test]
    fn silence_is_all_zeros() {
        let (_, samples) = generate(Waveform::Silence, 440.0, &test_config());
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn unknown_names_degrade_to_silence() {
        assert_eq!(Waveform::from_name("Sine"), Waveform::Sine);
        assert_eq!(Waveform::from_name("sawtooth"), Waveform::Sawtooth);
        assert_eq!(Waveform::from_name("Triangle"), Waveform::Silence);
        assert_eq!(Waveform::from_name(""), Waveform::Silence);
    }

    #[test]
    fn generation_is_deterministic() {
        let config = test_config();
        let (_, first) = generate(Waveform::Sawtooth, 440.0, &config);
        let (_, second) = generate(Waveform::Sawtooth, 440.0, &config);
        assert_eq!(first, second);
    }
}
