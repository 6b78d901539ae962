//! Offline DSP core: waveform synthesis and IIR filtering.
//!
//! Everything here is a stateless pure function over a fixed-size buffer.
//! One call renders one complete clip; there is no streaming, no internal
//! state between invocations, and no shared mutable data. The io layer and
//! the workbench binary compose these into the hear/view/save pipeline.

/// Butterworth IIR design and single-pass application.
pub mod filter;
/// Closed-form periodic waveform synthesis.
pub mod oscillator;
/// FFT magnitude helpers for charts and spectral assertions.
pub mod spectrum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default clip sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
/// Default clip length in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 1.0;

/// Geometry of a rendered clip.
///
/// Sample rate and duration are threaded through every signature rather than
/// living as module constants, so a caller can render at other rates or
/// lengths without touching the core.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipConfig {
    /// Samples per second.
    pub sample_rate: u32,
    /// Clip length in seconds.
    pub duration_secs: f64,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

impl ClipConfig {
    pub fn new(sample_rate: u32, duration_secs: f64) -> Self {
        Self {
            sample_rate,
            duration_secs,
        }
    }

    /// Number of samples in a clip: floor(sample_rate × duration).
    pub fn num_samples(&self) -> usize {
        (self.sample_rate as f64 * self.duration_secs) as usize
    }

    /// Half the sample rate; the highest representable frequency.
    pub fn nyquist(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }
}
