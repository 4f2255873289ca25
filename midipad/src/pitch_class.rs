// Project raw pitches onto the 15-slot scale-degree window.

use crate::note_state::NoteSnapshot;
use crate::notes15::Notes15;
use crate::units::{Pitch, WINDOW_SIZE};

/// Semitone offset of each window slot from the baseline pitch: two octaves
/// of the major scale, root to root.
pub const WINDOW_OFFSETS: [i32; WINDOW_SIZE] = [
    0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19, 21, 23, 24,
];

const WINDOW_SPAN: i32 = 24;
const OCTAVE: i32 = 12;

/// Pitch of the window's lowest slot when nothing is transposed (C3).
pub const DEFAULT_BASE_NOTE: Pitch = 48;

/// Where the window starts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Baseline {
    /// Semitones added to every incoming pitch before it is matched against
    /// the C3..C5 window.
    Transpose(i32),
    /// Absolute pitch of slot 0.
    BaseNote(Pitch),
}

impl Baseline {
    /// Pitch that lands on slot 0.
    pub fn base_pitch(self: &Self) -> i32 {
        match *self {
            Baseline::Transpose(semitones) => DEFAULT_BASE_NOTE as i32 - semitones,
            Baseline::BaseNote(pitch) => pitch as i32,
        }
    }
}

impl Default for Baseline {
    fn default() -> Self {
        Baseline::BaseNote(DEFAULT_BASE_NOTE)
    }
}

/// Move `offset` by whole octaves until it lies within the window span.
pub fn fold_offset(offset: i32) -> i32 {
    let mut folded = offset;
    while folded < 0 {
        folded += OCTAVE;
    }
    while folded > WINDOW_SPAN {
        folded -= OCTAVE;
    }
    folded
}

/// Slot matching a semitone offset exactly, if any.
pub fn slot_for_offset(offset: i32) -> Option<usize> {
    WINDOW_OFFSETS.iter().position(|&o| o == offset)
}

/// Build the window from a note snapshot.
///
/// When several pitches land on one slot, the most recent press wins.
pub fn project(snapshot: &NoteSnapshot, baseline: Baseline, extend: bool) -> Notes15 {
    let base = baseline.base_pitch();
    let mut notes = Notes15::default();

    for (pitch, &time) in snapshot.iter().enumerate() {
        if time == 0 {
            continue;
        }

        let mut offset = pitch as i32 - base;
        if extend {
            offset = fold_offset(offset);
        } else if offset < 0 || offset > WINDOW_SPAN {
            continue;
        }

        if let Some(slot) = slot_for_offset(offset) {
            if time > notes.get(slot as isize) {
                notes.set(slot, time);
            }
        }
    }

    notes
}
