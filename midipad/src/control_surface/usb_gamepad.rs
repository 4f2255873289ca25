// Generic USB HID gamepad, enumerating as a Logitech F310 in DirectInput mode.
//
// The F310 reports its triggers as plain buttons, so the trigger slots map
// to the ZL/ZR buttons rather than to analog triggers.

use super::Action::{Button, DPad, LeftStick, RightStick};
use super::Direction::{Down, Left, Right, Up};
use super::{ActionTable, AxisScale, ButtonId, ControlSurface};

pub const NAME: &str = "usb-gamepad";

pub const VENDOR_ID: u16 = 0x046D;
pub const PRODUCT_ID: u16 = 0xC216;

/// Bit positions in the report's button field.
pub mod button {
    use super::ButtonId;

    pub const X: ButtonId = 0;
    pub const A: ButtonId = 1;
    pub const B: ButtonId = 2;
    pub const Y: ButtonId = 3;
    pub const L: ButtonId = 4;
    pub const R: ButtonId = 5;
    pub const ZL: ButtonId = 6;
    pub const ZR: ButtonId = 7;
}

const SCALE: AxisScale = AxisScale {
    trigger_max: 255,
    stick_left: -127,
    stick_right: 127,
    stick_up: 127,
    stick_down: -127,
    stick_center: 0,
};

static MAPPINGS: [ActionTable; 2] = [
    ActionTable {
        name: "standard",
        actions: [
            Button(button::ZL),
            Button(button::ZR),
            DPad(Down),
            Button(button::A),
            DPad(Left),
            Button(button::X),
            DPad(Up),
            Button(button::Y),
            DPad(Right),
            Button(button::B),
            Button(button::L),
            Button(button::R),
            LeftStick(Left),
            RightStick(Left),
            LeftStick(Right),
        ],
    },
    ActionTable {
        name: "alternate",
        actions: [
            DPad(Down),
            DPad(Left),
            DPad(Up),
            LeftStick(Down),
            LeftStick(Left),
            Button(button::L),
            Button(button::ZL),
            RightStick(Down),
            RightStick(Right),
            RightStick(Up),
            Button(button::A),
            Button(button::B),
            Button(button::Y),
            Button(button::R),
            Button(button::ZR),
        ],
    },
];

pub struct UsbGamepad {
}

impl ControlSurface for UsbGamepad {
    fn name(self: &Self) -> &'static str {
        NAME
    }

    fn mappings(self: &Self) -> &'static [ActionTable] {
        &MAPPINGS
    }

    fn scale(self: &Self) -> AxisScale {
        SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_surface::DPad as Hat;
    use crate::notes15::Notes15;

    #[test]
    fn trigger_slots_press_buttons() {
        let surface = UsbGamepad {};
        let table = surface.mapping(1).unwrap();
        let notes = Notes15::new([5, 6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let report = surface.render(&notes, table);
        assert_eq!(report.buttons.mask(), (1 << button::ZL) | (1 << button::ZR));
        assert_eq!(report.left_trigger, 0);
        assert_eq!(report.dpad, Hat::Centered);
    }
}
