use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

use crate::dsp::filter::FilterMode;
use crate::dsp::oscillator::Waveform;

/*
16-bit PCM Export
=================

The float pipeline works in [-1.0, 1.0]; disk and playback want
symmetric 16-bit integers. Quantization clamps first and scales by
32767 second. The clamp matters: a filter with gain near the band
edge can push a sample a hair past full scale, and without it that
sample would wrap around on the cast to i16 and land at the opposite
rail as a loud click. Clipping flattens the peak instead.

The scale factor is 32767 both ways, so the quantizer never emits
i16::MIN and a round trip through disk comes back within one
quantization step of the (clamped) original.
*/

/// Full-scale magnitude of a quantized sample.
pub const PCM_FULL_SCALE: f32 = 32767.0;

/// Converts float samples to 16-bit PCM: clamp to [-1, 1], scale by
/// 32767, round to nearest.
pub fn quantize(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * PCM_FULL_SCALE).round() as i16)
        .collect()
}

/// Converts 16-bit PCM back to floats in [-1, 1].
pub fn dequantize(pcm: &[i16]) -> Vec<f32> {
    pcm.iter().map(|&s| s as f32 / PCM_FULL_SCALE).collect()
}

/// Wav file failures.
#[derive(Error, Debug)]
pub enum WavError {
    #[error("wav i/o failed: {0}")]
    Hound(#[from] hound::Error),
    #[error("expected mono 16-bit integer PCM, found {channels} channel(s) at {bits} bits")]
    UnsupportedLayout { channels: u16, bits: u16 },
}

/// Writes mono 16-bit PCM to `path`.
pub fn write_wav(path: &Path, pcm: &[i16], sample_rate: u32) -> Result<(), WavError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in pcm {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Reads a wav written by [`write_wav`]: mono 16-bit integer PCM.
/// Returns the samples and the file's sample rate.
pub fn read_wav(path: &Path) -> Result<(Vec<i16>, u32), WavError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels != 1 || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int
    {
        return Err(WavError::UnsupportedLayout {
            channels: spec.channels,
            bits: spec.bits_per_sample,
        });
    }
    let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
    Ok((samples, spec.sample_rate))
}

/// Export filename for a rendered clip, e.g. `Sine_low_filtered.wav`.
pub fn clip_filename(waveform: Waveform, mode: FilterMode) -> String {
    format!("{}_{}_filtered.wav", waveform.name(), mode.name())
}
