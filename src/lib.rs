pub mod dsp; // Offline synthesis, filtering, and measurement
pub mod io; // Wav files and playback sinks

pub use dsp::filter::{design_and_apply, FilterError, FilterMode, FilterSpec};
pub use dsp::oscillator::{generate, Waveform};
pub use dsp::spectrum::{magnitude_spectrum, Spectrum};
pub use dsp::ClipConfig;
pub use io::playback::{AudioSink, CpalSink, NullSink, PlaybackError};
pub use io::wav::{clip_filename, dequantize, quantize, read_wav, write_wav, WavError};
