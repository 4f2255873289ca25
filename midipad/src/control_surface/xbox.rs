// Xbox One S layout over Bluetooth LE.

use super::Action::{Button, DPad, LeftStick, LeftTrigger, RightStick, RightTrigger};
use super::Direction::{Down, Left, Right, Up};
use super::{ActionTable, AxisScale, ButtonId, ControlSurface};

pub const NAME: &str = "xbox-ble";

/// Bit positions in the Xbox gamepad button report.
#[allow(unused)]
pub mod button {
    use super::ButtonId;

    pub const A: ButtonId = 0;
    pub const B: ButtonId = 1;
    pub const X: ButtonId = 3;
    pub const Y: ButtonId = 4;
    pub const LB: ButtonId = 6;
    pub const RB: ButtonId = 7;
    pub const SELECT: ButtonId = 10;
    pub const START: ButtonId = 11;
    pub const HOME: ButtonId = 12;
    pub const LS: ButtonId = 13;
    pub const RS: ButtonId = 14;
}

const SCALE: AxisScale = AxisScale {
    trigger_max: 1023,
    stick_left: -32768,
    stick_right: 32767,
    stick_up: 32767,
    stick_down: -32768,
    stick_center: 0,
};

static MAPPINGS: [ActionTable; 2] = [
    ActionTable {
        name: "standard",
        actions: [
            LeftTrigger,
            RightTrigger,
            DPad(Down),
            Button(button::A),
            DPad(Left),
            Button(button::X),
            DPad(Up),
            Button(button::Y),
            DPad(Right),
            Button(button::B),
            Button(button::LB),
            Button(button::RB),
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
            Button(button::LB),
            LeftTrigger,
            RightStick(Down),
            RightStick(Right),
            RightStick(Up),
            Button(button::A),
            Button(button::B),
            Button(button::Y),
            Button(button::RB),
            RightTrigger,
        ],
    },
];

pub struct XboxBle {
}

impl ControlSurface for XboxBle {
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
