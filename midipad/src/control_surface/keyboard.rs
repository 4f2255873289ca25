// USB HID keyboard.
//
// Each slot types one key. A boot keyboard report only has room for a few
// keys, so the surface asks for the newest five slots, and the transport is
// fed press/release edges instead of whole reports.

use super::Action::Button;
use super::{ActionTable, AxisScale, ButtonSet, ButtonId, ControlSurface};

pub const NAME: &str = "usb-keyboard";

pub const MAX_SIMULTANEOUS_KEYS: usize = 5;

const SCALE: AxisScale = AxisScale {
    trigger_max: 0,
    stick_left: 0,
    stick_right: 0,
    stick_up: 0,
    stick_down: 0,
    stick_center: 0,
};

const RIGHT_HAND: ActionTable = ActionTable {
    name: "right hand",
    actions: [
        Button(b'y'),
        Button(b'u'),
        Button(b'i'),
        Button(b'o'),
        Button(b'p'),
        Button(b'h'),
        Button(b'j'),
        Button(b'k'),
        Button(b'l'),
        Button(b';'),
        Button(b'n'),
        Button(b'm'),
        Button(b','),
        Button(b'.'),
        Button(b'/'),
    ],
};

static MAPPINGS: [ActionTable; 2] = [RIGHT_HAND, RIGHT_HAND];

pub struct UsbKeyboard {
}

impl ControlSurface for UsbKeyboard {
    fn name(self: &Self) -> &'static str {
        NAME
    }

    fn mappings(self: &Self) -> &'static [ActionTable] {
        &MAPPINGS
    }

    fn scale(self: &Self) -> AxisScale {
        SCALE
    }

    fn max_simultaneous(self: &Self) -> Option<usize> {
        Some(MAX_SIMULTANEOUS_KEYS)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyChange {
    Press(ButtonId),
    Release(ButtonId),
}

/// Key edges between two reports, in ascending key code order.
pub fn key_changes<'a>(previous: &'a ButtonSet, current: &'a ButtonSet) -> impl Iterator<Item = KeyChange> + 'a {
    (0..=ButtonId::MAX).filter_map(move |key| {
        match (previous.contains(key), current.contains(key)) {
            (false, true) => Some(KeyChange::Press(key)),
            (true, false) => Some(KeyChange::Release(key)),
            _ => None,
        }
    })
}
