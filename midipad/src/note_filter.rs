//! Cap the number of simultaneously active slots.
//!
//! Devices such as a USB keyboard can only report a handful of keys at
//! once. The filter keeps the most recently pressed slots, and once a slot
//! has been pushed out by newer ones it stays out until it is pressed again.
//! Without that, releasing one of the newer notes would make an old held
//! note pop back in.

use log::*;

use crate::notes15::Notes15;
use crate::units::{Timestamp, WINDOW_SIZE};

#[derive(Clone, Debug, Default)]
pub struct NoteFilter {
    cutoff: Timestamp,
}

impl NoteFilter {
    pub fn new() -> Self {
        NoteFilter::default()
    }

    /// Slots pressed at or before this time are never selected again.
    pub fn cutoff(self: &Self) -> Timestamp {
        self.cutoff
    }

    /// Keep at most `max_count` of the newest slots; zero the rest.
    pub fn latest(self: &mut Self, notes: &Notes15, max_count: usize) -> Notes15 {
        let cutoff = self.cutoff;
        let qualifies = |time: Timestamp| time > 0 && time > cutoff;

        let mut selected = [false; WINDOW_SIZE];
        let mut result = Notes15::default();

        for _ in 0..max_count {
            let newest = notes.timestamps().iter().enumerate()
                .filter(|&(index, &time)| !selected[index] && qualifies(time))
                .max_by_key(|&(_, &time)| time);

            match newest {
                Some((index, &time)) => {
                    selected[index] = true;
                    result.set(index, time);
                }
                None => break,
            }
        }

        let dropped = notes.timestamps().iter().enumerate()
            .filter(|&(index, &time)| !selected[index] && qualifies(time))
            .map(|(_, &time)| time)
            .max();

        if let Some(time) = dropped {
            if time > self.cutoff {
                debug!("note filter cutoff raised {} -> {}", self.cutoff, time);
                self.cutoff = time;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(timestamps: &[Timestamp]) -> Notes15 {
        let mut all = [0; WINDOW_SIZE];
        all[..timestamps.len()].copy_from_slice(timestamps);
        Notes15::new(all)
    }

    #[test]
    fn keeps_newest() {
        let mut filter = NoteFilter::new();
        let result = filter.latest(&notes(&[7, 6, 5, 4, 3, 2, 1]), 3);

        assert_eq!(result.get(0), 7);
        assert_eq!(result.get(1), 6);
        assert_eq!(result.get(2), 5);
        for index in 3..15 {
            assert_eq!(result.get(index), 0);
        }
        assert_eq!(filter.cutoff(), 4);
    }

    #[test]
    fn dropped_notes_do_not_come_back() {
        let mut filter = NoteFilter::new();
        filter.latest(&notes(&[7, 6, 5, 4, 3, 2, 1]), 3);

        // Slot 0 released: the held slots 3..6 stay excluded.
        let result = filter.latest(&notes(&[0, 6, 5, 4, 3, 2, 1]), 3);
        assert_eq!(result, notes(&[0, 6, 5]));

        // A press older than the cutoff does not resurrect anything either.
        let result = filter.latest(&notes(&[0, 6, 5, 4, 3, 2, 1, 0, 3]), 3);
        assert_eq!(result, notes(&[0, 6, 5]));
        assert_eq!(filter.cutoff(), 4);
    }

    #[test]
    fn fresh_press_is_selected() {
        let mut filter = NoteFilter::new();
        filter.latest(&notes(&[7, 6, 5, 4, 3, 2, 1]), 3);

        let result = filter.latest(&notes(&[0, 0, 0, 9, 3, 2, 1]), 3);
        assert_eq!(result, notes(&[0, 0, 0, 9]));
    }

    #[test]
    fn under_the_cap_passes_through() {
        let mut filter = NoteFilter::new();
        let input = notes(&[0, 3, 0, 8, 0, 0, 1]);
        assert_eq!(filter.latest(&input, 5), input);
        assert_eq!(filter.cutoff(), 0);
    }

    #[test]
    fn cutoff_never_lowers() {
        let mut filter = NoteFilter::new();
        filter.latest(&notes(&[10, 20, 30]), 1);
        assert_eq!(filter.cutoff(), 20);

        filter.latest(&notes(&[40, 25, 0]), 1);
        assert_eq!(filter.cutoff(), 25);

        filter.latest(&notes(&[0, 0, 0]), 1);
        assert_eq!(filter.cutoff(), 25);
    }

    #[test]
    fn zero_cap_selects_nothing() {
        let mut filter = NoteFilter::new();
        let result = filter.latest(&notes(&[1, 2]), 0);
        assert!(result.is_empty());
        assert_eq!(filter.cutoff(), 2);
    }
}
