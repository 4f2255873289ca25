use midipad::control_surface::keyboard::{self, KeyChange};
use midipad::control_surface::ButtonSet;
use midipad::{Frame, Timestamp};

/// Formats frames as printable lines, one per frame.
///
/// The keyboard transport only understands key edges, so for that surface
/// the presses and releases since the previous frame are appended.
pub struct FrameLog {
    keyboard: bool,
    keys: ButtonSet,
}

impl FrameLog {
    pub fn new(surface_name: &str) -> Self {
        FrameLog {
            keyboard: surface_name == keyboard::NAME,
            keys: ButtonSet::new(),
        }
    }

    pub fn line(self: &mut Self, time: Timestamp, frame: &Frame) -> String {
        let mut line = format!("{:>8} {}", time, frame.pressed);
        if !self.keyboard {
            line.push_str(&format!(" {}", frame.report));
            return line;
        }

        for change in keyboard::key_changes(&self.keys, &frame.report.buttons) {
            let edge = match change {
                KeyChange::Press(key) => format!(" +{}", key as char),
                KeyChange::Release(key) => format!(" -{}", key as char),
            };
            line.push_str(&edge);
        }
        self.keys = frame.report.buttons;
        line
    }
}
