pub mod control_surface;
pub mod error;
pub mod midi;
pub mod note_filter;
pub mod note_state;
pub mod notes15;
pub mod pitch_class;
pub mod units;

pub use control_surface::{ActionReport, ActionTable, ControlSurface};
pub use error::{Error, Result};
pub use midi::{MidiEvent, MidiParser};
pub use note_filter::NoteFilter;
pub use note_state::{NoteState, SharedNoteState};
pub use notes15::Notes15;
pub use pitch_class::Baseline;
pub use units::{Clock, Pitch, Timestamp};

use log::*;

pub const BASE_NOTE_MIN: Pitch = 24;
pub const BASE_NOTE_MAX: Pitch = 84;
pub const TRANSPOSE_MIN: i32 = -24;
pub const TRANSPOSE_MAX: i32 = 24;

/// Settings the pipeline reads on every evaluation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// 1-based index into the surface's action tables.
    pub mapping: usize,
    pub baseline: Baseline,
    /// Fold pitches outside the window back in by octaves.
    pub extend: bool,
    pub sustain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mapping: 1,
            baseline: Baseline::default(),
            extend: false,
            sustain: false,
        }
    }
}

impl Config {
    fn check_baseline(self: &Self) -> Result<()> {
        match self.baseline {
            Baseline::BaseNote(pitch) => {
                if pitch < BASE_NOTE_MIN || pitch > BASE_NOTE_MAX {
                    return Err(Error::BaseNoteOutOfRange {
                        value: pitch as i32,
                        min: BASE_NOTE_MIN as i32,
                        max: BASE_NOTE_MAX as i32,
                    });
                }
            },
            Baseline::Transpose(semitones) => {
                if semitones < TRANSPOSE_MIN || semitones > TRANSPOSE_MAX {
                    return Err(Error::TransposeOutOfRange {
                        value: semitones,
                        min: TRANSPOSE_MIN,
                        max: TRANSPOSE_MAX,
                    });
                }
            },
        }
        Ok(())
    }
}

/// Output of one evaluation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame {
    /// The whole window, for display.
    pub pressed: Notes15,
    /// The slots the surface gets to see after the simultaneous-input cap.
    pub active: Notes15,
    pub report: ActionReport,
    /// Whether `report` differs from the last one handed out.
    pub report_changed: bool,
}

/// Runs note state through projection, filtering and rendering for one
/// control surface.
pub struct Engine {
    surface: Box<dyn ControlSurface + Send>,
    table: &'static ActionTable,
    config: Config,
    filter: NoteFilter,
    previous: Option<Frame>,
}

impl Engine {
    pub fn new(surface: Box<dyn ControlSurface + Send>, config: Config) -> Result<Engine> {
        config.check_baseline()?;
        let table = surface.mapping(config.mapping)?;
        info!("{}: mapping {} ({}), baseline {:?}, extend {}, sustain {}",
              surface.name(), config.mapping, table.name, config.baseline, config.extend, config.sustain);
        return Ok(Engine {
            surface,
            table,
            config,
            filter: NoteFilter::new(),
            previous: None,
        });
    }

    pub fn config(self: &Self) -> &Config {
        &self.config
    }

    pub fn surface(self: &Self) -> &dyn ControlSurface {
        self.surface.as_ref()
    }

    pub fn table(self: &Self) -> &'static ActionTable {
        self.table
    }

    /// Switch to a new configuration. Nothing changes if it is rejected.
    ///
    /// The next evaluation always produces a frame. The note filter keeps
    /// its cutoff, so keys it has dropped stay dropped.
    pub fn configure(self: &mut Self, config: Config) -> Result<()> {
        config.check_baseline()?;
        let table = self.surface.mapping(config.mapping)?;
        if config != self.config {
            info!("config changed: {:?} -> {:?}", self.config, config);
        }
        self.table = table;
        self.config = config;
        self.previous = None;
        Ok(())
    }

    /// Project, filter and render an already-built window.
    pub fn render(self: &mut Self, pressed: &Notes15) -> Frame {
        let active = match self.surface.max_simultaneous() {
            Some(max_count) => self.filter.latest(pressed, max_count),
            None => *pressed,
        };
        let report = self.surface.render(&active, self.table);
        let report_changed = match &self.previous {
            Some(previous) => previous.report != report,
            None => true,
        };
        Frame { pressed: *pressed, active, report, report_changed }
    }

    /// Evaluate the current note state.
    ///
    /// Returns a frame only when the window or the report changed since the
    /// previous evaluation, so callers can forward it as is.
    pub fn evaluate(self: &mut Self, notes: &SharedNoteState, now: Timestamp) -> Option<Frame> {
        let snapshot = {
            let mut state = notes.lock();
            state.set_sustain_enabled(self.config.sustain);
            state.snapshot(now)
        };
        let pressed = pitch_class::project(&snapshot, self.config.baseline, self.config.extend);
        let frame = self.render(&pressed);

        let changed = match &self.previous {
            Some(previous) => frame.report_changed || previous.pressed != frame.pressed,
            None => true,
        };
        if !changed {
            return None;
        }

        debug!("{} -> {}", frame.pressed, frame.report);
        self.previous = Some(frame);
        Some(frame)
    }
}
