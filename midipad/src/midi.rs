//! Decode raw MIDI into the few events the pipeline cares about.
//!
//! Only note on/off and the sustain pedal (CC 64) are kept. Channel is
//! ignored. Everything else, including SysEx and real-time bytes, is skipped.

use log::*;

use std::fmt;

use crate::units::Pitch;

pub const CC_SUSTAIN: u8 = 64;

/// Controller values at or above this count as "pedal down".
pub const SUSTAIN_THRESHOLD: u8 = 64;

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MidiEvent {
    NoteOn { pitch: Pitch },
    NoteOff { pitch: Pitch },
    SustainPedal { down: bool },
}

impl fmt::Display for MidiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiEvent::NoteOn { pitch } => write!(f, "note-on {}", pitch),
            MidiEvent::NoteOff { pitch } => write!(f, "note-off {}", pitch),
            MidiEvent::SustainPedal { down: true } => write!(f, "sustain down"),
            MidiEvent::SustainPedal { down: false } => write!(f, "sustain up"),
        }
    }
}

fn is_note_on(midi_status: u8) -> bool {
    (midi_status & 0xF0) == 0x90
}

fn is_note_off(midi_status: u8) -> bool {
    (midi_status & 0xF0) == 0x80
}

fn is_control_change(midi_status: u8) -> bool {
    (midi_status & 0xF0) == 0xB0
}

/// Decode one complete channel message.
///
/// A note-on with velocity 0 is a note-off, as most keyboards send it.
pub fn decode(status: u8, data1: u8, data2: u8) -> Option<MidiEvent> {
    if is_note_on(status) {
        if data2 == 0 {
            Some(MidiEvent::NoteOff { pitch: data1 })
        } else {
            Some(MidiEvent::NoteOn { pitch: data1 })
        }
    } else if is_note_off(status) {
        Some(MidiEvent::NoteOff { pitch: data1 })
    } else if is_control_change(status) && data1 == CC_SUSTAIN {
        Some(MidiEvent::SustainPedal { down: data2 >= SUSTAIN_THRESHOLD })
    } else {
        None
    }
}

/// Number of data bytes following a status byte.
fn data_length(status: u8) -> usize {
    match status & 0xF0 {
        0xC0 | 0xD0 => 1,
        0x80 | 0x90 | 0xA0 | 0xB0 | 0xE0 => 2,
        _ => match status {
            0xF1 | 0xF3 => 1,
            0xF2 => 2,
            _ => 0,
        },
    }
}

/// Incremental decoder for a serial MIDI byte stream.
///
/// Never blocks: feed bytes as they arrive and collect events as they
/// complete. Running status is honoured for channel messages.
#[derive(Debug, Default)]
pub struct MidiParser {
    status: Option<u8>,
    data: [u8; 2],
    received: usize,
    in_sysex: bool,
}

impl MidiParser {
    pub fn new() -> Self {
        MidiParser::default()
    }

    pub fn push_byte(self: &mut Self, byte: u8) -> Option<MidiEvent> {
        if byte >= 0xF8 {
            // Real-time messages may appear anywhere and carry no data.
            return None;
        }

        if byte & 0x80 != 0 {
            self.received = 0;
            if byte == SYSEX_START {
                self.in_sysex = true;
                self.status = None;
            } else if byte == SYSEX_END {
                self.in_sysex = false;
                self.status = None;
            } else {
                self.in_sysex = false;
                self.status = Some(byte);
                if byte >= 0xF0 && data_length(byte) == 0 {
                    self.status = None;
                }
            }
            return None;
        }

        if self.in_sysex {
            return None;
        }

        let status = match self.status {
            Some(status) => status,
            None => {
                debug!("Skipping data byte {:#04x} without status", byte);
                return None;
            }
        };

        self.data[self.received] = byte;
        self.received += 1;
        if self.received < data_length(status) {
            return None;
        }
        self.received = 0;

        if status >= 0xF0 {
            // System common messages do not set running status.
            self.status = None;
            return None;
        }

        decode(status, self.data[0], self.data[1])
    }

    /// Feed a slice of bytes, calling `handle` for every decoded event.
    pub fn push_bytes(self: &mut Self, bytes: &[u8], handle: &mut dyn FnMut(MidiEvent)) {
        for &byte in bytes {
            if let Some(event) = self.push_byte(byte) {
                handle(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(bytes: &[u8]) -> Vec<MidiEvent> {
        let mut parser = MidiParser::new();
        let mut events = Vec::new();
        parser.push_bytes(bytes, &mut |e| events.push(e));
        events
    }

    #[test]
    fn decodes_note_messages_on_any_channel() {
        assert_eq!(decode(0x90, 60, 100), Some(MidiEvent::NoteOn { pitch: 60 }));
        assert_eq!(decode(0x9F, 61, 1), Some(MidiEvent::NoteOn { pitch: 61 }));
        assert_eq!(decode(0x83, 60, 64), Some(MidiEvent::NoteOff { pitch: 60 }));
    }

    #[test]
    fn zero_velocity_note_on_is_note_off() {
        assert_eq!(decode(0x90, 60, 0), Some(MidiEvent::NoteOff { pitch: 60 }));
    }

    #[test]
    fn sustain_pedal_threshold() {
        assert_eq!(decode(0xB0, 64, 63), Some(MidiEvent::SustainPedal { down: false }));
        assert_eq!(decode(0xB0, 64, 64), Some(MidiEvent::SustainPedal { down: true }));
        assert_eq!(decode(0xB0, 1, 127), None);
        assert_eq!(decode(0xE0, 0, 64), None);
    }

    #[test]
    fn running_status() {
        let events = parse_all(&[0x90, 60, 100, 62, 100, 60, 0]);
        assert_eq!(events, vec![
            MidiEvent::NoteOn { pitch: 60 },
            MidiEvent::NoteOn { pitch: 62 },
            MidiEvent::NoteOff { pitch: 60 },
        ]);
    }

    #[test]
    fn real_time_bytes_inside_message() {
        let events = parse_all(&[0x90, 0xF8, 60, 0xFE, 100]);
        assert_eq!(events, vec![MidiEvent::NoteOn { pitch: 60 }]);
    }

    #[test]
    fn skips_sysex_and_unrelated_messages() {
        let events = parse_all(&[
            0xF0, 0x7E, 0x00, 0x06, 0x01, 0xF7,
            0xC0, 5,
            0xE0, 0x00, 0x40,
            0xB0, 64, 127,
        ]);
        assert_eq!(events, vec![MidiEvent::SustainPedal { down: true }]);
    }

    #[test]
    fn data_without_status_is_ignored() {
        assert!(parse_all(&[60, 100]).is_empty());
        // Song position pointer clears running status.
        assert!(parse_all(&[0x90, 60, 100, 0xF2, 0, 0, 60, 100]).len() == 1);
    }
}
