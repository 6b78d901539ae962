use rustfft::{num_complex::Complex, FftPlanner};

/*
Spectral Measurement
====================

One-shot magnitude spectrum of a finished clip. The clip model is
offline, so there is no streaming analyzer here: render, analyze once,
read the answer. A Hann window tames the leakage from partial cycles
at the clip boundary, and magnitudes are normalized against the window
sum so a unit-amplitude sine sitting on a bin centre reads 1.0
regardless of clip length.

The workbench uses this for its spectrum panel; tests use it to check
that an oscillator put its energy where the frequency knob said.
*/

/// One-sided magnitude spectrum of a clip.
pub struct Spectrum {
    magnitudes: Vec<f64>,
    bin_width_hz: f64,
}

/// Windows the clip, runs a forward FFT, and folds it to one side.
pub fn magnitude_spectrum(samples: &[f32], sample_rate: u32) -> Spectrum {
    let n = samples.len();
    if n == 0 {
        return Spectrum {
            magnitudes: Vec::new(),
            bin_width_hz: 0.0,
        };
    }

    let window: Vec<f32> = (0..n)
        .map(|i| {
            if n > 1 {
                let denom = (n - 1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
            } else {
                1.0
            }
        })
        .collect();
    let window_sum: f64 = window.iter().map(|&w| w as f64).sum();

    let mut buffer: Vec<Complex<f32>> = samples
        .iter()
        .zip(&window)
        .map(|(&s, &w)| Complex::new(s * w, 0.0))
        .collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    // Fold to one side. Each bin picks up the energy of its mirror
    // image, except DC and, for even lengths, the Nyquist bin, which
    // are their own mirrors.
    let half = n / 2 + 1;
    let magnitudes = buffer[..half]
        .iter()
        .enumerate()
        .map(|(k, bin)| {
            let self_mirrored = k == 0 || (n % 2 == 0 && k == half - 1);
            let fold = if self_mirrored { 1.0 } else { 2.0 };
            bin.norm() as f64 * fold / window_sum.max(f64::EPSILON)
        })
        .collect();

    Spectrum {
        magnitudes,
        bin_width_hz: sample_rate as f64 / n as f64,
    }
}

impl Spectrum {
    /// Width of one frequency bin in Hz. A one-second clip gives 1 Hz
    /// bins.
    pub fn bin_width_hz(&self) -> f64 {
        self.bin_width_hz
    }

    /// Normalized magnitude per bin, DC first.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Magnitude of the bin nearest `freq_hz`, or 0.0 when the clip is
    /// empty or the frequency lies past Nyquist.
    pub fn magnitude_near_hz(&self, freq_hz: f64) -> f64 {
        if self.bin_width_hz <= 0.0 {
            return 0.0;
        }
        let index = (freq_hz / self.bin_width_hz).round() as usize;
        self.magnitudes.get(index).copied().unwrap_or(0.0)
    }

    /// Frequency of the strongest non-DC bin.
    ///
    /// DC is excluded on purpose: "dominant frequency" means the tone
    /// you would hear, and a clip of silence reports 0.0 rather than
    /// whichever noise bin won.
    pub fn dominant_frequency_hz(&self) -> f64 {
        let mut best_index = 0;
        let mut best_magnitude = 0.0;
        for (index, &magnitude) in self.magnitudes.iter().enumerate().skip(1) {
            if magnitude > best_magnitude {
                best_magnitude = magnitude;
                best_index = index;
            }
        }
        best_index as f64 * self.bin_width_hz
    }

    /// Log-spaced (frequency, dB) pairs ready for charting, from
    /// `min_hz` up to Nyquist. Magnitudes are floored at -120 dB so an
    /// empty band still draws.
    pub fn log_spaced_db(&self, points: usize, min_hz: f64) -> Vec<(f64, f64)> {
        if self.magnitudes.len() < 2 || points == 0 {
            return Vec::new();
        }
        let nyquist = (self.magnitudes.len() - 1) as f64 * self.bin_width_hz;
        let min_hz = min_hz.max(self.bin_width_hz).min(nyquist);
        let ratio = nyquist / min_hz;

        (0..points)
            .map(|i| {
                let t = if points > 1 {
                    i as f64 / (points - 1) as f64
                } else {
                    0.0
                };
                let freq = if ratio > 1.0 {
                    min_hz * ratio.powf(t)
                } else {
                    min_hz
                };
                let magnitude = self.magnitude_near_hz(freq).max(1e-6);
                (freq, 20.0 * magnitude.log10())
            })
            .collect()
    }
}
