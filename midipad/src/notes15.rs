use std::fmt;

use crate::units::{Timestamp, WINDOW_SIZE};

/// One window of 15 scale-degree slots.
///
/// Each slot holds the time its note became active, or 0 when inactive, so
/// the same value serves as a pressed flag and as a recency key.
#[derive(Clone)]
#[derive(Copy)]
#[derive(Debug)]
#[derive(Default)]
#[derive(Eq)]
#[derive(Hash)]
#[derive(PartialEq)]
pub struct Notes15 {
    timestamps: [Timestamp; WINDOW_SIZE],
}

impl Notes15 {
    pub fn new(timestamps: [Timestamp; WINDOW_SIZE]) -> Self {
        Notes15 { timestamps }
    }

    /// Timestamp of slot `index`; 0 for inactive or out-of-range slots.
    pub fn get(self: &Self, index: isize) -> Timestamp {
        if index >= 0 && (index as usize) < WINDOW_SIZE {
            self.timestamps[index as usize]
        } else {
            0
        }
    }

    pub fn is_pressed(self: &Self, index: usize) -> bool {
        index < WINDOW_SIZE && self.timestamps[index] != 0
    }

    pub fn timestamps(self: &Self) -> &[Timestamp; WINDOW_SIZE] {
        &self.timestamps
    }

    /// Slot states as booleans, for display.
    pub fn pressed(self: &Self) -> [bool; WINDOW_SIZE] {
        let mut pressed = [false; WINDOW_SIZE];
        for (flag, &time) in pressed.iter_mut().zip(self.timestamps.iter()) {
            *flag = time != 0;
        }
        pressed
    }

    pub fn count(self: &Self) -> usize {
        self.timestamps.iter().filter(|&&t| t != 0).count()
    }

    pub fn is_empty(self: &Self) -> bool {
        self.count() == 0
    }

    /// Indices of active slots, ascending.
    pub fn active_slots(self: &Self) -> impl Iterator<Item = usize> + '_ {
        self.timestamps.iter().enumerate()
            .filter(|(_, &time)| time != 0)
            .map(|(index, _)| index)
    }

    pub(crate) fn set(self: &mut Self, index: usize, time: Timestamp) {
        self.timestamps[index] = time;
    }
}

impl From<[Timestamp; WINDOW_SIZE]> for Notes15 {
    fn from(timestamps: [Timestamp; WINDOW_SIZE]) -> Self {
        Notes15::new(timestamps)
    }
}

/// Three rows of five, the way the pad grid is laid out on screen.
impl fmt::Display for Notes15 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, &time) in self.timestamps.iter().enumerate() {
            if index > 0 && index % 5 == 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", if time != 0 { '#' } else { '.' })?;
        }
        Ok(())
    }
}
