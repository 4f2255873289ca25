use std::time::Instant;

/// MIDI note number, 0-127.
pub type Pitch = u8;

/// Milliseconds on a monotonic clock. Zero is reserved to mean "released".
pub type Timestamp = u64;

pub const NUM_PITCHES: usize = 128;

/// Number of slots in the scale-degree window.
pub const WINDOW_SIZE: usize = 15;

/// How long a re-pressed sustained note reads as released.
pub const REPRESS_MUTE_MS: Timestamp = 50;

/// Monotonic millisecond clock for note timestamps.
///
/// Readings start at 1 so that a note pressed at start-up is never confused
/// with a released one.
#[derive(Clone)]
#[derive(Copy)]
#[derive(Debug)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Clock { origin: Instant::now() }
    }

    pub fn now(self: &Self) -> Timestamp {
        self.at(Instant::now())
    }

    pub fn at(self: &Self, instant: Instant) -> Timestamp {
        let elapsed = instant.saturating_duration_since(self.origin);
        elapsed.as_millis() as Timestamp + 1
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}
