// Nintendo Switch compatible USB pad (HORI-style report).
//
// Sticks are unsigned with 128 at rest, and the Y axis grows downwards.

use super::Action::{Button, DPad, LeftStick, RightStick};
use super::Direction::{Down, Left, Right, Up};
use super::{ActionTable, AxisScale, ButtonId, ControlSurface};

pub const NAME: &str = "switch";

#[allow(unused)]
pub mod button {
    use super::ButtonId;

    pub const Y: ButtonId = 0;
    pub const B: ButtonId = 1;
    pub const A: ButtonId = 2;
    pub const X: ButtonId = 3;
    pub const L: ButtonId = 4;
    pub const R: ButtonId = 5;
    pub const ZL: ButtonId = 6;
    pub const ZR: ButtonId = 7;
    pub const MINUS: ButtonId = 8;
    pub const PLUS: ButtonId = 9;
    pub const LEFT_STICK: ButtonId = 10;
    pub const RIGHT_STICK: ButtonId = 11;
    pub const HOME: ButtonId = 12;
    pub const CAPTURE: ButtonId = 13;
}

const SCALE: AxisScale = AxisScale {
    trigger_max: 255,
    stick_left: 0,
    stick_right: 255,
    stick_up: 0,
    stick_down: 255,
    stick_center: 128,
};

static MAPPINGS: [ActionTable; 2] = [
    ActionTable {
        name: "standard",
        actions: [
            Button(button::ZL),
            Button(button::ZR),
            DPad(Down),
            Button(button::B),
            DPad(Left),
            Button(button::Y),
            DPad(Up),
            Button(button::X),
            DPad(Right),
            Button(button::A),
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
            Button(button::B),
            Button(button::A),
            Button(button::X),
            Button(button::R),
            Button(button::ZR),
        ],
    },
];

pub struct SwitchPad {
}

impl ControlSurface for SwitchPad {
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
