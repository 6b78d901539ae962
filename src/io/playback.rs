use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use thiserror::Error;

use super::wav::PCM_FULL_SCALE;

/*
Playback Sinks
==============

The render pipeline ends in a buffer of 16-bit PCM; what happens to it
next is a sink's business. `AudioSink` is the seam: the workbench
holds a `Box<dyn AudioSink>`, the real one talks to the default output
device through cpal, and tests swap in `NullSink` so they never touch
audio hardware.

`CpalSink::play` blocks until the clip drains. The clip model is
single-shot and synchronous, so there is nothing useful to do while a
one-second tone plays, and returning early would tear the stream down
mid-buffer. A deadline a little past the clip length guards against a
device that accepts the stream and then never pulls samples.
*/

/// Playback failures, from device discovery through draining.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("no audio output device available")]
    NoOutputDevice,
    #[error("could not enumerate output configurations: {0}")]
    Configs(#[from] cpal::SupportedStreamConfigsError),
    #[error("no output configuration supports {sample_rate} Hz")]
    UnsupportedSampleRate { sample_rate: u32 },
    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start playback: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("playback stalled; clip did not finish within {waited_ms} ms")]
    Stalled { waited_ms: u64 },
}

/// Destination for a finished clip.
pub trait AudioSink {
    /// Plays one mono clip of 16-bit PCM at `sample_rate`, returning
    /// once it has been delivered.
    fn play(&mut self, pcm: &[i16], sample_rate: u32) -> Result<(), PlaybackError>;
}

/// Real sink: plays through the default cpal output device, blocking
/// until the clip has drained.
#[derive(Default)]
pub struct CpalSink;

impl CpalSink {
    pub fn new() -> Self {
        Self
    }
}

impl AudioSink for CpalSink {
    fn play(&mut self, pcm: &[i16], sample_rate: u32) -> Result<(), PlaybackError> {
        if pcm.is_empty() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PlaybackError::NoOutputDevice)?;

        // Pick an f32 output layout that can run at the clip's rate.
        // Resampling is out of scope; a device that cannot do the
        // clip's rate is reported, not worked around.
        let supported = device
            .supported_output_configs()?
            .filter(|range| range.sample_format() == SampleFormat::F32)
            .find(|range| {
                range.min_sample_rate().0 <= sample_rate
                    && sample_rate <= range.max_sample_rate().0
            })
            .ok_or(PlaybackError::UnsupportedSampleRate { sample_rate })?
            .with_sample_rate(SampleRate(sample_rate));
        let config: StreamConfig = supported.into();
        let channels = config.channels as usize;

        // The callback walks the clip by a shared cursor and pads with
        // silence once it runs out, flipping `done` so this thread can
        // stop waiting.
        let samples: Arc<Vec<f32>> = Arc::new(
            pcm.iter().map(|&s| s as f32 / PCM_FULL_SCALE).collect(),
        );
        let cursor = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicBool::new(false));

        let stream = {
            let samples = samples.clone();
            let cursor = cursor.clone();
            let done = done.clone();
            device.build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    let mut position = cursor.load(Ordering::Relaxed);
                    for frame in data.chunks_mut(channels) {
                        let sample = samples.get(position).copied().unwrap_or(0.0);
                        for out in frame.iter_mut() {
                            *out = sample;
                        }
                        position += 1;
                    }
                    if position >= samples.len() {
                        done.store(true, Ordering::Relaxed);
                    }
                    cursor.store(position, Ordering::Relaxed);
                },
                |err| eprintln!("audio error: {}", err),
                None,
            )?
        };
        stream.play()?;

        let clip = Duration::from_secs_f64(pcm.len() as f64 / sample_rate as f64);
        let deadline = Instant::now() + clip + Duration::from_secs(2);
        while !done.load(Ordering::Relaxed) {
            if Instant::now() > deadline {
                return Err(PlaybackError::Stalled {
                    waited_ms: (clip + Duration::from_secs(2)).as_millis() as u64,
                });
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        // Let the device swallow its final buffer before tearing the
        // stream down.
        std::thread::sleep(Duration::from_millis(50));
        Ok(())
    }
}

/// Discards clips. Stands in for real hardware in tests and headless
/// runs, remembering just enough to assert against.
#[derive(Debug, Default)]
pub struct NullSink {
    pub plays: usize,
    pub last_len: usize,
    pub last_sample_rate: u32,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for NullSink {
    fn play(&mut self, pcm: &[i16], sample_rate: u32) -> Result<(), PlaybackError> {
        self.plays += 1;
        self.last_len = pcm.len();
        self.last_sample_rate = sample_rate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_records_what_it_was_fed() {
        let mut sink = NullSink::new();
        sink.play(&[0, 1, -1], 44_100).unwrap();
        sink.play(&[5; 10], 22_050).unwrap();
        assert_eq!(sink.plays, 2);
        assert_eq!(sink.last_len, 10);
        assert_eq!(sink.last_sample_rate, 22_050);
    }

    #[test]
    fn sinks_are_object_safe() {
        let mut sink: Box<dyn AudioSink> = Box::new(NullSink::new());
        sink.play(&[1, 2, 3], 44_100).unwrap();
    }
}
