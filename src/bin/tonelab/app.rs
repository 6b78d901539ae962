//! Workbench state and the render-tweak-audition loop.
//!
//! The model is synchronous: every parameter change re-renders the
//! whole one-second clip through the full pipeline (oscillator,
//! filter, spectrum) before the next frame draws. At 44100 samples
//! that sits far below a frame budget, and the charts, the playback
//! buffer, and the export file always describe the same render.

use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use tonelab_dsp::{
    clip_filename, design_and_apply, generate, magnitude_spectrum, quantize, write_wav, AudioSink,
    ClipConfig, FilterMode, FilterSpec, Waveform,
};

use super::ui;

// Parameter ranges and per-keypress step sizes.
const FREQ_MIN: f32 = 100.0;
const FREQ_MAX: f32 = 2000.0;
const FREQ_STEP: f32 = 10.0;
const LOW_CUTOFF_MIN: f32 = 100.0;
const LOW_CUTOFF_MAX: f32 = 4000.0;
const HIGH_CUTOFF_MIN: f32 = 500.0;
const HIGH_CUTOFF_MAX: f32 = 5000.0;
const CUTOFF_STEP: f32 = 50.0;

/// Points sampled from the spectrum for the chart.
const SPECTRUM_POINTS: usize = 128;

/// Most recent noteworthy event, shown in the status line.
pub enum Status {
    Info(String),
    Warning(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(text) | Status::Warning(text) | Status::Error(text) => text,
        }
    }
}

/// The whole workbench: current parameters, the clip they render to,
/// and the sink that auditions it.
pub struct Workbench {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    pub filter: FilterSpec,
    pub config: ClipConfig,

    /// Time axis of the current clip, seconds.
    pub time_axis: Vec<f32>,
    /// The clip after filtering; what gets charted, played, and saved.
    pub filtered: Vec<f32>,
    /// Log-spaced (frequency, dB) points of the filtered clip.
    pub spectrum: Vec<(f64, f64)>,
    pub status: Status,

    sink: Box<dyn AudioSink>,
    should_quit: bool,
}

impl Workbench {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        let mut workbench = Self {
            waveform: Waveform::Sine,
            frequency_hz: 440.0,
            filter: FilterSpec::new(FilterMode::LowPass, 500.0, 2000.0),
            config: ClipConfig::default(),
            time_axis: Vec::new(),
            filtered: Vec::new(),
            spectrum: Vec::new(),
            status: Status::Info(String::from("ready")),
            sink,
            should_quit: false,
        };
        workbench.render_clip();
        workbench
    }

    /// Run the event loop until quit.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self))?;

            // Non-blocking input, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                self.waveform = cycle(&Waveform::ALL, self.waveform);
                self.render_clip();
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.filter.mode = cycle(&FilterMode::ALL, self.filter.mode);
                self.render_clip();
            }
            KeyCode::Left => {
                self.frequency_hz = (self.frequency_hz - FREQ_STEP).clamp(FREQ_MIN, FREQ_MAX);
                self.render_clip();
            }
            KeyCode::Right => {
                self.frequency_hz = (self.frequency_hz + FREQ_STEP).clamp(FREQ_MIN, FREQ_MAX);
                self.render_clip();
            }
            KeyCode::Char('[') => {
                self.filter.low_cutoff_hz =
                    (self.filter.low_cutoff_hz - CUTOFF_STEP).clamp(LOW_CUTOFF_MIN, LOW_CUTOFF_MAX);
                self.render_clip();
            }
            KeyCode::Char(']') => {
                self.filter.low_cutoff_hz =
                    (self.filter.low_cutoff_hz + CUTOFF_STEP).clamp(LOW_CUTOFF_MIN, LOW_CUTOFF_MAX);
                self.render_clip();
            }
            KeyCode::Char('{') => {
                self.filter.high_cutoff_hz = (self.filter.high_cutoff_hz - CUTOFF_STEP)
                    .clamp(HIGH_CUTOFF_MIN, HIGH_CUTOFF_MAX);
                self.render_clip();
            }
            KeyCode::Char('}') => {
                self.filter.high_cutoff_hz = (self.filter.high_cutoff_hz + CUTOFF_STEP)
                    .clamp(HIGH_CUTOFF_MIN, HIGH_CUTOFF_MAX);
                self.render_clip();
            }
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => self.play(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.save(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            _ => {}
        }
    }

    /// Re-render the clip from the current parameters.
    ///
    /// Band edges in the wrong order are corrected for this render
    /// only, with a warning; the knobs keep whatever the user set.
    /// A filter that rejects its parameters outright is bypassed so
    /// the raw tone stays visible and audible.
    fn render_clip(&mut self) {
        let (time_axis, raw) = generate(self.waveform, self.frequency_hz, &self.config);
        let (corrected, swapped) = self.filter.normalized();

        let filtered = match design_and_apply(&raw, &corrected, self.config.sample_rate) {
            Ok(output) => {
                self.status = if swapped {
                    Status::Warning(format!(
                        "band edges swapped: using {:.0}..{:.0} Hz",
                        corrected.low_cutoff_hz, corrected.high_cutoff_hz
                    ))
                } else {
                    Status::Info(format!(
                        "{} at {:.0} Hz, {}",
                        self.waveform.name(),
                        self.frequency_hz,
                        self.filter.mode.label()
                    ))
                };
                output
            }
            Err(err) => {
                self.status = Status::Warning(format!("filter bypassed: {err}"));
                raw
            }
        };

        self.spectrum = magnitude_spectrum(&filtered, self.config.sample_rate)
            .log_spaced_db(SPECTRUM_POINTS, 20.0);
        self.time_axis = time_axis;
        self.filtered = filtered;
    }

    /// Quantize the current clip and push it through the sink,
    /// blocking until it has played out.
    fn play(&mut self) {
        let pcm = quantize(&self.filtered);
        match self.sink.play(&pcm, self.config.sample_rate) {
            Ok(()) => {
                self.status = Status::Info(format!(
                    "played {:.1} s clip",
                    self.config.duration_secs
                ));
            }
            Err(err) => self.status = Status::Error(format!("playback failed: {err}")),
        }
    }

    /// Export the current clip as 16-bit PCM wav in the working
    /// directory, named after the shape and filter mode.
    fn save(&mut self) {
        let name = clip_filename(self.waveform, self.filter.mode);
        let pcm = quantize(&self.filtered);
        match write_wav(Path::new(&name), &pcm, self.config.sample_rate) {
            Ok(()) => self.status = Status::Info(format!("saved {name}")),
            Err(err) => self.status = Status::Error(format!("save failed: {err}")),
        }
    }

    fn reset(&mut self) {
        self.waveform = Waveform::Sine;
        self.frequency_hz = 440.0;
        self.filter = FilterSpec::new(FilterMode::LowPass, 500.0, 2000.0);
        self.render_clip();
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T) -> T {
    let index = options.iter().position(|&option| option == current).unwrap_or(0);
    options[(index + 1) % options.len()]
}
