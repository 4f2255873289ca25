//! Track which MIDI pitches are currently held.
//!
//! Incoming note and pedal events are recorded as they are received, and
//! turned into a per-pitch snapshot every time the pipeline is evaluated.

use crate::midi::MidiEvent;
use crate::units::{Pitch, Timestamp, NUM_PITCHES, REPRESS_MUTE_MS};

use log::*;

use std::sync::{Arc, Mutex, MutexGuard};

/// Per-pitch press time as seen by the pipeline, 0 for released.
pub type NoteSnapshot = [Timestamp; NUM_PITCHES];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PitchState {
    pressed_at: Timestamp,
    physically_held: bool,
    repress_mute_from: Timestamp,
}

#[derive(Clone, Debug)]
pub struct NoteState {
    pitches: [PitchState; NUM_PITCHES],
    sustain_pedal_down: bool,
    sustain_enabled: bool,
}

impl Default for NoteState {
    fn default() -> Self {
        NoteState {
            pitches: [PitchState::default(); NUM_PITCHES],
            sustain_pedal_down: false,
            sustain_enabled: false,
        }
    }
}

fn pitch_index(pitch: Pitch) -> Option<usize> {
    let index = pitch as usize;
    if index < NUM_PITCHES {
        Some(index)
    } else {
        None
    }
}

impl NoteState {
    pub fn new() -> Self {
        NoteState::default()
    }

    fn sustaining(self: &Self) -> bool {
        self.sustain_enabled && self.sustain_pedal_down
    }

    pub fn sustain_enabled(self: &Self) -> bool {
        self.sustain_enabled
    }

    pub fn sustain_pedal_down(self: &Self) -> bool {
        self.sustain_pedal_down
    }

    pub fn note_on(self: &mut Self, pitch: Pitch, time: Timestamp) {
        let index = match pitch_index(pitch) {
            Some(index) => index,
            None => return,
        };
        let time = time.max(1);
        let sustaining = self.sustaining();
        let state = &mut self.pitches[index];

        if sustaining && state.pressed_at != 0 {
            debug!("re-press of sustained pitch {} at {}", pitch, time);
            state.repress_mute_from = time;
        } else {
            state.repress_mute_from = 0;
        }
        state.physically_held = true;
        state.pressed_at = time;
    }

    pub fn note_off(self: &mut Self, pitch: Pitch, _time: Timestamp) {
        let index = match pitch_index(pitch) {
            Some(index) => index,
            None => return,
        };
        let sustaining = self.sustaining();
        let state = &mut self.pitches[index];

        state.physically_held = false;
        state.repress_mute_from = 0;
        if !sustaining {
            state.pressed_at = 0;
        }
    }

    /// The pedal position is always tracked; it only holds notes while
    /// sustain is enabled.
    pub fn sustain_pedal(self: &mut Self, down: bool) {
        let was_down = self.sustain_pedal_down;
        self.sustain_pedal_down = down;
        if self.sustain_enabled && was_down && !down {
            self.release_sustained();
        }
    }

    pub fn set_sustain_enabled(self: &mut Self, enabled: bool) {
        if self.sustain_enabled == enabled {
            return;
        }
        info!("sustain {}", if enabled { "enabled" } else { "disabled" });
        self.sustain_enabled = enabled;
        if !enabled {
            self.release_sustained();
        }
    }

    /// Release every note that is only kept on by the pedal.
    fn release_sustained(self: &mut Self) {
        for state in self.pitches.iter_mut() {
            if state.pressed_at != 0 && !state.physically_held {
                state.pressed_at = 0;
                state.repress_mute_from = 0;
            }
        }
    }

    pub fn apply(self: &mut Self, event: MidiEvent, time: Timestamp) {
        match event {
            MidiEvent::NoteOn { pitch } => self.note_on(pitch, time),
            MidiEvent::NoteOff { pitch } => self.note_off(pitch, time),
            MidiEvent::SustainPedal { down } => self.sustain_pedal(down),
        }
    }

    /// Press times as of `time`.
    ///
    /// A re-pressed sustained pitch reads as released until the mute window
    /// has passed; the mute is dropped once it has.
    pub fn snapshot(self: &mut Self, time: Timestamp) -> NoteSnapshot {
        let mut snapshot = [0; NUM_PITCHES];
        for (slot, state) in snapshot.iter_mut().zip(self.pitches.iter_mut()) {
            if state.pressed_at == 0 {
                continue;
            }
            if state.repress_mute_from != 0 {
                if time.saturating_sub(state.repress_mute_from) < REPRESS_MUTE_MS {
                    continue;
                }
                state.repress_mute_from = 0;
            }
            *slot = state.pressed_at;
        }
        snapshot
    }
}

/// `NoteState` shared between the MIDI input task and the evaluation loop.
///
/// Every read and write takes the lock, so the two sides never see a
/// half-applied event.
#[derive(Clone, Debug, Default)]
pub struct SharedNoteState {
    inner: Arc<Mutex<NoteState>>,
}

impl SharedNoteState {
    pub fn new(state: NoteState) -> Self {
        SharedNoteState { inner: Arc::new(Mutex::new(state)) }
    }

    /// Lock the state. A panic on the other side leaves plain data behind,
    /// so a poisoned lock is taken over as is.
    pub fn lock(self: &Self) -> MutexGuard<'_, NoteState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("note state lock was poisoned");
                poisoned.into_inner()
            }
        }
    }

    pub fn apply(self: &Self, event: MidiEvent, time: Timestamp) {
        self.lock().apply(event, time);
    }

    pub fn note_on(self: &Self, pitch: Pitch, time: Timestamp) {
        self.lock().note_on(pitch, time);
    }

    pub fn note_off(self: &Self, pitch: Pitch, time: Timestamp) {
        self.lock().note_off(pitch, time);
    }

    pub fn sustain_pedal(self: &Self, down: bool) {
        self.lock().sustain_pedal(down);
    }

    pub fn set_sustain_enabled(self: &Self, enabled: bool) {
        self.lock().set_sustain_enabled(enabled);
    }

    pub fn snapshot(self: &Self, time: Timestamp) -> NoteSnapshot {
        self.lock().snapshot(time)
    }
}
