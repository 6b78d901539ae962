use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use num_complex::Complex64;
use thiserror::Error;

/*
Butterworth IIR Filtering
=========================

| mode      | passes          | rejects       | taps (order 5) |
| --------- | --------------- | ------------- | -------------- |
| low-pass  | below cutoff    | above cutoff  | 6              |
| high-pass | above cutoff    | below cutoff  | 6              |
| band-pass | between cutoffs | outside edges | 11             |
| none      | everything      | nothing       | identity       |

A Butterworth filter is the "maximally flat" filter: no ripple in the
passband and exactly -3.01 dB at the cutoff frequency regardless of
order, with a gentler knee than Chebyshev or elliptic designs.

Coefficient design walks the classical analog-prototype route:

  1. Place the prototype poles. An order-N Butterworth lowpass has N
     poles evenly spaced on the left half of the unit circle in the
     s-plane, at angles pi*m/(2N) for m = -N+1, -N+3, .., N-1. No
     finite zeros, unit gain.
  2. Pre-warp the cutoff. The bilinear transform compresses the whole
     analog axis into [0, Nyquist], bending frequencies as it goes.
     Warping the design cutoff with tan() first cancels that bend at
     the cutoff itself, so the digital filter lands its -3 dB point
     exactly where asked.
  3. Re-target the band. lp_to_lp scales the prototype to the warped
     cutoff; lp_to_hp inverts the poles about it and plants zeros at
     DC; lp_to_bp splits every pole in two around the band centre,
     which is why a band-pass of order N carries 2N poles.
  4. Bilinear-transform the analog poles and zeros into the z-plane,
     then multiply the factored form out into polynomial coefficients
     (b, a).

Application is a single causal forward pass in direct form II
transposed, the same recurrence SciPy's lfilter uses, starting from
zero state. The first few milliseconds of output therefore carry a
start-up transient; nothing hides it, and tests that measure gain
skip past it.

Everything here computes in f64. The coefficients of a narrow
band-pass at 44.1 kHz span several orders of magnitude, and running
the recurrence in f32 audibly degrades the stopband. Buffers stay f32
at the API boundary; samples are widened on the way in and narrowed
on the way out.
*/

/// All designs are fifth order, a 100 dB/decade skirt.
pub const FILTER_ORDER: usize = 5;

/// Frequency-selective behavior of [`design_and_apply`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    LowPass,
    HighPass,
    BandPass,
    /// Bypass. The buffer comes back bit-for-bit unchanged.
    None,
}

impl FilterMode {
    pub const ALL: [FilterMode; 4] = [
        FilterMode::LowPass,
        FilterMode::HighPass,
        FilterMode::BandPass,
        FilterMode::None,
    ];

    /// Short name used in filenames and config.
    pub fn name(&self) -> &'static str {
        match self {
            FilterMode::LowPass => "low",
            FilterMode::HighPass => "high",
            FilterMode::BandPass => "band",
            FilterMode::None => "none",
        }
    }

    /// Label used in chart titles and status lines.
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::LowPass => "low-pass",
            FilterMode::HighPass => "high-pass",
            FilterMode::BandPass => "band-pass",
            FilterMode::None => "unfiltered",
        }
    }

    /// Parses a mode name. Unrecognized names degrade to
    /// [`FilterMode::None`] so a stale config selects the bypass
    /// rather than an error.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "low" | "lowpass" | "low-pass" => FilterMode::LowPass,
            "high" | "highpass" | "high-pass" => FilterMode::HighPass,
            "band" | "bandpass" | "band-pass" => FilterMode::BandPass,
            _ => FilterMode::None,
        }
    }
}

/// Everything [`design_and_apply`] needs besides the buffer itself.
///
/// Both cutoffs are always present; each mode reads the ones it cares
/// about. `low_cutoff_hz` drives low-pass, `high_cutoff_hz` drives
/// high-pass, and band-pass uses the pair as its edges.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub mode: FilterMode,
    pub low_cutoff_hz: f32,
    pub high_cutoff_hz: f32,
}

impl FilterSpec {
    pub fn new(mode: FilterMode, low_cutoff_hz: f32, high_cutoff_hz: f32) -> Self {
        Self {
            mode,
            low_cutoff_hz,
            high_cutoff_hz,
        }
    }

    /// Orders the band edges so `low_cutoff_hz < high_cutoff_hz`.
    ///
    /// Returns the corrected spec plus whether a swap happened, so the
    /// caller can tell the user their band was inverted. Modes other
    /// than band-pass never swap; they ignore the edge they do not
    /// use.
    pub fn normalized(self) -> (Self, bool) {
        if self.mode == FilterMode::BandPass && self.low_cutoff_hz > self.high_cutoff_hz {
            let swapped = Self {
                low_cutoff_hz: self.high_cutoff_hz,
                high_cutoff_hz: self.low_cutoff_hz,
                ..self
            };
            (swapped, true)
        } else {
            (self, false)
        }
    }
}

/// Rejected filter parameters. Design refuses to produce garbage
/// coefficients; callers surface these as warnings and fall back to
/// the unfiltered buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FilterError {
    /// Cutoffs must sit strictly between 0 Hz and Nyquist. `wn` is the
    /// offending cutoff normalized so 1.0 is Nyquist.
    #[error("normalized cutoff {wn} is outside (0, 1); cutoffs must lie strictly between 0 Hz and Nyquist")]
    CutoffOutOfRange { wn: f64 },
    /// A band-pass whose edges coincide has zero bandwidth and no
    /// meaningful response.
    #[error("band-pass edges coincide at normalized frequency {wn}; the band has zero width")]
    DegenerateBand { wn: f64 },
}

/// Target band for [`butterworth`], cutoffs normalized so 1.0 is the
/// Nyquist frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Lowpass { cutoff: f64 },
    Highpass { cutoff: f64 },
    /// Edges may arrive in either order; design sorts them.
    Bandpass { low: f64, high: f64 },
}

/// Polynomial transfer-function coefficients of a designed filter.
///
/// `b` holds the feed-forward taps, `a` the feedback taps. Both have
/// the same length and `a[0]` is exactly 1.0, so the recurrence in
/// [`lfilter`] needs no normalization step.
#[derive(Debug, Clone, PartialEq)]
pub struct IirCoefficients {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl IirCoefficients {
    /// Number of delay elements the filter state needs.
    pub fn order(&self) -> usize {
        self.b.len().saturating_sub(1)
    }
}

/// Designs a digital Butterworth filter of the given order.
///
/// Follows the analog-prototype pipeline described at the top of this
/// module and matches SciPy's `butter` step for step: same pole
/// placement, same tan() pre-warp against a fictitious 2 Hz sample
/// rate, same bilinear transform, same polynomial expansion.
pub fn butterworth(order: usize, band: Band) -> Result<IirCoefficients, FilterError> {
    // Fictitious sample rate the bilinear transform is taken against.
    // With fs = 2 the normalized cutoff 1.0 lands exactly on Nyquist.
    const FS: f64 = 2.0;

    let analog_poles = prototype_poles(order);
    let zeros: Vec<Complex64> = Vec::new();
    let gain = 1.0;

    let (zeros, poles, gain) = match band {
        Band::Lowpass { cutoff } => {
            let warped = prewarp(validated(cutoff)?, FS);
            lp_to_lp(zeros, analog_poles, gain, warped)
        }
        Band::Highpass { cutoff } => {
            let warped = prewarp(validated(cutoff)?, FS);
            lp_to_hp(zeros, analog_poles, gain, warped)
        }
        Band::Bandpass { low, high } => {
            let (low, high) = sorted_edges(low, high)?;
            let w1 = prewarp(validated(low)?, FS);
            let w2 = prewarp(validated(high)?, FS);
            let bandwidth = w2 - w1;
            let centre = (w1 * w2).sqrt();
            lp_to_bp(zeros, analog_poles, gain, centre, bandwidth)
        }
    };

    let (zeros, poles, gain) = bilinear(zeros, poles, gain, FS);

    let b = polynomial(&zeros).into_iter().map(|c| c * gain).collect();
    let a = polynomial(&poles);
    Ok(IirCoefficients { b, a })
}

/// Runs one causal forward pass of the filter over `input`, starting
/// from zero state. Direct form II transposed, the same recurrence as
/// SciPy's `lfilter`.
pub fn lfilter(coeffs: &IirCoefficients, input: &[f32]) -> Vec<f32> {
    debug_assert_eq!(coeffs.b.len(), coeffs.a.len());
    let b = &coeffs.b;
    let a = &coeffs.a;
    let order = coeffs.order();
    if order == 0 {
        let g = b.first().copied().unwrap_or(1.0);
        return input.iter().map(|&x| (g * x as f64) as f32).collect();
    }

    let mut state = vec![0.0f64; order];
    let mut output = Vec::with_capacity(input.len());
    for &sample in input {
        let x = sample as f64;
        let y = b[0] * x + state[0];
        for i in 0..order - 1 {
            state[i] = b[i + 1] * x + state[i + 1] - a[i + 1] * y;
        }
        state[order - 1] = b[order] * x - a[order] * y;
        output.push(y as f32);
    }
    output
}

/// Designs and applies the filter `spec` describes, in one shot.
///
/// The returned buffer always has the same length as the input.
/// [`FilterMode::None`] copies the input through untouched, so an
/// unfiltered pipeline stays bit-for-bit identical to the raw
/// oscillator output. Band edges given in the wrong order are sorted
/// before design; call [`FilterSpec::normalized`] first if you need
/// to know the swap happened.
pub fn design_and_apply(
    samples: &[f32],
    spec: &FilterSpec,
    sample_rate: u32,
) -> Result<Vec<f32>, FilterError> {
    let nyquist = sample_rate as f64 / 2.0;
    let band = match spec.mode {
        FilterMode::None => return Ok(samples.to_vec()),
        FilterMode::LowPass => Band::Lowpass {
            cutoff: spec.low_cutoff_hz as f64 / nyquist,
        },
        FilterMode::HighPass => Band::Highpass {
            cutoff: spec.high_cutoff_hz as f64 / nyquist,
        },
        FilterMode::BandPass => Band::Bandpass {
            low: spec.low_cutoff_hz as f64 / nyquist,
            high: spec.high_cutoff_hz as f64 / nyquist,
        },
    };
    let coeffs = butterworth(FILTER_ORDER, band)?;
    Ok(lfilter(&coeffs, samples))
}

/// Order-N Butterworth prototype: N poles on the left half of the
/// s-plane unit circle, no finite zeros, unit gain.
fn prototype_poles(order: usize) -> Vec<Complex64> {
    (0..order)
        .map(|k| {
            let m = 2 * k as i64 - order as i64 + 1;
            let theta = PI * m as f64 / (2.0 * order as f64);
            -Complex64::from_polar(1.0, theta)
        })
        .collect()
}

fn validated(wn: f64) -> Result<f64, FilterError> {
    if wn.is_finite() && wn > 0.0 && wn < 1.0 {
        Ok(wn)
    } else {
        Err(FilterError::CutoffOutOfRange { wn })
    }
}

fn sorted_edges(low: f64, high: f64) -> Result<(f64, f64), FilterError> {
    if low == high {
        return Err(FilterError::DegenerateBand { wn: low });
    }
    if low < high {
        Ok((low, high))
    } else {
        Ok((high, low))
    }
}

/// Maps a normalized cutoff onto the analog axis so the bilinear
/// transform lands it back exactly where it started.
fn prewarp(wn: f64, fs: f64) -> f64 {
    2.0 * fs * (PI * wn / fs).tan()
}

type Zpk = (Vec<Complex64>, Vec<Complex64>, f64);

/// Scales the unit-cutoff prototype out to cutoff `wo`.
fn lp_to_lp(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64, wo: f64) -> Zpk {
    let degree = poles.len() - zeros.len();
    let zeros = zeros.into_iter().map(|z| z * wo).collect();
    let poles = poles.into_iter().map(|p| p * wo).collect();
    (zeros, poles, gain * wo.powi(degree as i32))
}

/// Inverts the prototype about `wo` and plants zeros at DC.
fn lp_to_hp(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64, wo: f64) -> Zpk {
    let degree = poles.len() - zeros.len();
    // Gain correction comes from the untransformed roots.
    let num: Complex64 = zeros.iter().map(|&z| -z).product();
    let den: Complex64 = poles.iter().map(|&p| -p).product();
    let gain = gain * (num / den).re;

    let mut hp_zeros: Vec<Complex64> =
        zeros.into_iter().map(|z| Complex64::from(wo) / z).collect();
    hp_zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
    let hp_poles = poles.into_iter().map(|p| Complex64::from(wo) / p).collect();
    (hp_zeros, hp_poles, gain)
}

/// Splits every prototype root in two around the band centre `wo`.
/// Doubles the pole count, which is why band-pass designs carry twice
/// the taps.
fn lp_to_bp(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64, wo: f64, bw: f64) -> Zpk {
    let degree = poles.len() - zeros.len();
    let split = |roots: Vec<Complex64>| -> Vec<Complex64> {
        let scaled: Vec<Complex64> = roots.into_iter().map(|r| r * (bw / 2.0)).collect();
        let offset = |r: Complex64| (r * r - Complex64::from(wo * wo)).sqrt();
        let upper = scaled.iter().map(|&r| r + offset(r));
        let lower = scaled.iter().map(|&r| r - offset(r));
        upper.chain(lower).collect()
    };

    let mut bp_zeros = split(zeros);
    bp_zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
    let bp_poles = split(poles);
    (bp_zeros, bp_poles, gain * bw.powi(degree as i32))
}

/// Maps analog poles and zeros into the z-plane. Zeros at analog
/// infinity land on z = -1, which is what folds the response to zero
/// at Nyquist for low-pass designs.
fn bilinear(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64, fs: f64) -> Zpk {
    let degree = poles.len() - zeros.len();
    let fs2 = Complex64::from(2.0 * fs);

    let num: Complex64 = zeros.iter().map(|&z| fs2 - z).product();
    let den: Complex64 = poles.iter().map(|&p| fs2 - p).product();
    let gain = gain * (num / den).re;

    let mut z_zeros: Vec<Complex64> = zeros.into_iter().map(|z| (fs2 + z) / (fs2 - z)).collect();
    z_zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));
    let z_poles = poles.into_iter().map(|p| (fs2 + p) / (fs2 - p)).collect();
    (z_zeros, z_poles, gain)
}

/// Expands a factored polynomial with the given roots into monic
/// coefficients, highest power first. Roots always arrive in
/// conjugate pairs (or real), so the imaginary parts cancel and only
/// float noise gets discarded.
fn polynomial(roots: &[Complex64]) -> Vec<f64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs.into_iter().map(|c| c.re).collect()
}
