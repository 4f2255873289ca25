//! Turn the 15-slot window into device actions.
//!
//! Every output device is described by a [`ControlSurface`]: a set of action
//! tables (one action per window slot) and the numeric ranges its HID report
//! uses. Rendering is the same for every device.

pub mod keyboard;
pub mod switch;
pub mod usb_gamepad;
pub mod xbox;

use std::fmt;

use crate::error::{Error, Result};
use crate::notes15::Notes15;
use crate::units::WINDOW_SIZE;

pub use keyboard::UsbKeyboard;
pub use switch::SwitchPad;
pub use usb_gamepad::UsbGamepad;
pub use xbox::XboxBle;

pub type ButtonId = u8;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What one window slot does when its note is on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Button(ButtonId),
    DPad(Direction),
    LeftTrigger,
    RightTrigger,
    LeftStick(Direction),
    RightStick(Direction),
}

#[derive(Debug)]
pub struct ActionTable {
    pub name: &'static str,
    pub actions: [Action; WINDOW_SIZE],
}

/// Full-scale values of a device's analog controls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AxisScale {
    pub trigger_max: i32,
    pub stick_left: i32,
    pub stick_right: i32,
    pub stick_up: i32,
    pub stick_down: i32,
    pub stick_center: i32,
}

impl AxisScale {
    fn stick_extreme(self: &Self, direction: Direction) -> i32 {
        match direction {
            Direction::Left => self.stick_left,
            Direction::Right => self.stick_right,
            Direction::Up => self.stick_up,
            Direction::Down => self.stick_down,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DPad {
    Centered,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Default for DPad {
    fn default() -> Self {
        DPad::Centered
    }
}

impl DPad {
    /// Combine independently pressed directions into one hat position.
    ///
    /// Diagonals take precedence; opposite directions resolve to up or right.
    pub fn from_flags(up: bool, down: bool, right: bool, left: bool) -> DPad {
        if up && right {
            DPad::UpRight
        } else if up && left {
            DPad::UpLeft
        } else if down && right {
            DPad::DownRight
        } else if down && left {
            DPad::DownLeft
        } else if up {
            DPad::Up
        } else if down {
            DPad::Down
        } else if right {
            DPad::Right
        } else if left {
            DPad::Left
        } else {
            DPad::Centered
        }
    }
}

/// Fixed-size set of pressed button ids.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct ButtonSet {
    bits: [u64; 4],
}

impl ButtonSet {
    pub fn new() -> Self {
        ButtonSet::default()
    }

    pub fn insert(self: &mut Self, id: ButtonId) {
        self.bits[(id / 64) as usize] |= 1u64 << (id % 64);
    }

    pub fn contains(self: &Self, id: ButtonId) -> bool {
        self.bits[(id / 64) as usize] & (1u64 << (id % 64)) != 0
    }

    pub fn is_empty(self: &Self) -> bool {
        self.bits.iter().all(|&word| word == 0)
    }

    pub fn len(self: &Self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Pressed ids, ascending.
    pub fn iter(self: &Self) -> impl Iterator<Item = ButtonId> + '_ {
        (0..=ButtonId::MAX).filter(move |&id| self.contains(id))
    }

    /// The low 32 buttons as a HID bitmask.
    pub fn mask(self: &Self) -> u32 {
        self.bits[0] as u32
    }
}

impl fmt::Debug for ButtonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Stick {
    pub x: i32,
    pub y: i32,
}

/// Everything one HID report needs, rebuilt from scratch on each evaluation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ActionReport {
    pub buttons: ButtonSet,
    pub dpad: DPad,
    pub left_trigger: i32,
    pub right_trigger: i32,
    pub left_stick: Stick,
    pub right_stick: Stick,
}

impl fmt::Display for ActionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buttons {:?} dpad {:?} triggers {}/{} sticks ({},{}) ({},{})",
               self.buttons, self.dpad,
               self.left_trigger, self.right_trigger,
               self.left_stick.x, self.left_stick.y,
               self.right_stick.x, self.right_stick.y)
    }
}

fn drive_stick(stick: &mut Stick, direction: Direction, scale: &AxisScale) {
    let value = scale.stick_extreme(direction);
    match direction {
        Direction::Left | Direction::Right => stick.x = value,
        Direction::Up | Direction::Down => stick.y = value,
    }
}

/// Render the active slots of `notes` through `table`.
///
/// Slots are applied in ascending order, so when two slots drive the same
/// stick axis the higher slot wins.
pub fn render(notes: &Notes15, table: &ActionTable, scale: &AxisScale) -> ActionReport {
    let centered = Stick { x: scale.stick_center, y: scale.stick_center };
    let mut report = ActionReport {
        left_stick: centered,
        right_stick: centered,
        ..ActionReport::default()
    };

    let (mut up, mut down, mut right, mut left) = (false, false, false, false);

    for slot in notes.active_slots() {
        match table.actions[slot] {
            Action::Button(id) => report.buttons.insert(id),
            Action::DPad(Direction::Up) => up = true,
            Action::DPad(Direction::Down) => down = true,
            Action::DPad(Direction::Right) => right = true,
            Action::DPad(Direction::Left) => left = true,
            Action::LeftTrigger => report.left_trigger = scale.trigger_max,
            Action::RightTrigger => report.right_trigger = scale.trigger_max,
            Action::LeftStick(direction) => drive_stick(&mut report.left_stick, direction, scale),
            Action::RightStick(direction) => drive_stick(&mut report.right_stick, direction, scale),
        }
    }

    report.dpad = DPad::from_flags(up, down, right, left);
    report
}

/// An output device the window can be mapped onto.
pub trait ControlSurface {
    fn name(self: &Self) -> &'static str;

    fn mappings(self: &Self) -> &'static [ActionTable];

    fn scale(self: &Self) -> AxisScale;

    /// How many slots the device can report at once, if limited.
    fn max_simultaneous(self: &Self) -> Option<usize> {
        None
    }

    /// Look up a table by its 1-based index.
    fn mapping(self: &Self, index: usize) -> Result<&'static ActionTable> {
        let mappings = self.mappings();
        if index == 0 || index > mappings.len() {
            return Err(Error::UnknownMapping {
                surface: self.name(),
                index,
                count: mappings.len(),
            });
        }
        Ok(&mappings[index - 1])
    }

    fn render(self: &Self, notes: &Notes15, table: &ActionTable) -> ActionReport {
        render(notes, table, &self.scale())
    }
}

pub const SURFACE_NAMES: [&str; 4] = [
    xbox::NAME,
    usb_gamepad::NAME,
    switch::NAME,
    keyboard::NAME,
];

/// Pick a compiled-in surface by its short name.
pub fn by_name(name: &str) -> Result<Box<dyn ControlSurface + Send>> {
    match name {
        xbox::NAME => Ok(Box::new(XboxBle {})),
        usb_gamepad::NAME => Ok(Box::new(UsbGamepad {})),
        switch::NAME => Ok(Box::new(SwitchPad {})),
        keyboard::NAME => Ok(Box::new(UsbKeyboard {})),
        _ => Err(Error::UnknownSurface(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Timestamp;

    use super::Action::{Button, LeftStick, LeftTrigger, RightStick, RightTrigger};
    use super::Direction::*;

    const SCALE: AxisScale = AxisScale {
        trigger_max: 1023,
        stick_left: -100,
        stick_right: 100,
        stick_up: 50,
        stick_down: -50,
        stick_center: 0,
    };

    const TABLE: ActionTable = ActionTable {
        name: "test",
        actions: [
            LeftTrigger, RightTrigger, Action::DPad(Up), Action::DPad(Right), Action::DPad(Down),
            Action::DPad(Left), Button(0), Button(7), LeftStick(Left), LeftStick(Right),
            RightStick(Up), RightStick(Down), Button(200), LeftStick(Up), Button(7),
        ],
    };

    fn active(slots: &[usize]) -> Notes15 {
        let mut timestamps = [0; WINDOW_SIZE];
        for (n, &slot) in slots.iter().enumerate() {
            timestamps[slot] = (n + 1) as Timestamp;
        }
        Notes15::new(timestamps)
    }

    #[test]
    fn nothing_pressed_is_neutral() {
        let report = render(&Notes15::default(), &TABLE, &SCALE);
        assert_eq!(report.dpad, DPad::Centered);
        assert!(report.buttons.is_empty());
        assert_eq!(report.left_trigger, 0);
        assert_eq!(report.left_stick, Stick { x: 0, y: 0 });
    }

    #[test]
    fn dpad_diagonal() {
        assert_eq!(render(&active(&[2, 3]), &TABLE, &SCALE).dpad, DPad::UpRight);
        assert_eq!(render(&active(&[4, 5]), &TABLE, &SCALE).dpad, DPad::DownLeft);
        assert_eq!(render(&active(&[5]), &TABLE, &SCALE).dpad, DPad::Left);
    }

    #[test]
    fn dpad_priorities() {
        assert_eq!(DPad::from_flags(true, true, false, false), DPad::Up);
        assert_eq!(DPad::from_flags(false, false, true, true), DPad::Right);
        assert_eq!(DPad::from_flags(true, true, true, true), DPad::UpRight);
        assert_eq!(DPad::from_flags(false, true, false, true), DPad::DownLeft);
    }

    #[test]
    fn buttons_and_triggers() {
        let report = render(&active(&[0, 6, 7, 12, 14]), &TABLE, &SCALE);
        assert_eq!(report.left_trigger, 1023);
        assert_eq!(report.right_trigger, 0);
        assert_eq!(report.buttons.iter().collect::<Vec<_>>(), vec![0, 7, 200]);
        assert_eq!(report.buttons.len(), 3);
        assert_eq!(report.buttons.mask(), 0b1000_0001);
    }

    #[test]
    fn stick_axes_and_last_slot_wins() {
        let report = render(&active(&[8, 13]), &TABLE, &SCALE);
        assert_eq!(report.left_stick, Stick { x: -100, y: 50 });

        let report = render(&active(&[9, 8]), &TABLE, &SCALE);
        assert_eq!(report.left_stick.x, 100);

        let report = render(&active(&[10, 11]), &TABLE, &SCALE);
        assert_eq!(report.right_stick, Stick { x: 0, y: -50 });
    }

    #[test]
    fn stick_rests_at_center() {
        let scale = AxisScale { stick_center: 128, ..SCALE };
        let report = render(&active(&[8]), &TABLE, &scale);
        assert_eq!(report.left_stick, Stick { x: -100, y: 128 });
        assert_eq!(report.right_stick, Stick { x: 128, y: 128 });
    }

    #[test]
    fn mapping_index_is_checked() {
        for name in SURFACE_NAMES.iter() {
            let surface = by_name(name).unwrap();
            let count = surface.mappings().len();
            assert!(surface.mapping(1).is_ok());
            assert!(surface.mapping(count).is_ok());
            assert_eq!(surface.mapping(0).unwrap_err(),
                       Error::UnknownMapping { surface: surface.name(), index: 0, count });
            assert!(surface.mapping(count + 1).is_err());
        }
    }

    #[test]
    fn unknown_surface() {
        assert!(by_name("theremin").is_err());
    }
}
