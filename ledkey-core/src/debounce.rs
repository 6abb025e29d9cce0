//! Per-key debounce filter
//!
//! Each key has a saturating counter in `0..=DEBOUNCE_MAX`. A pressed sample
//! counts up, a released sample counts down. The stable state only changes
//! at the ends of the range:
//!
//! ```text
//! counter:  0 ── 1 ── 2 ── 3 ── 4
//! stable:   off  (unchanged)    on
//! ```
//!
//! Changing state therefore takes `DEBOUNCE_MAX` consistent samples in a
//! row, and anything shorter is absorbed by the hysteresis band. The filter
//! counts samples, not time: latency is `DEBOUNCE_MAX` poll intervals, so
//! an irregular poll rate gives an irregular debounce time.

/// Samples needed to change a key's stable state.
/// At a 10 ms poll this is ~40 ms.
pub const DEBOUNCE_MAX: u8 = 4;

/// Debounce state for `N` keys (at most 32)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer<const N: usize> {
    /// Debounced key state (bit set = pressed)
    stable: u32,
    /// Stable state before the last update
    previous: u32,
    counters: [u8; N],
}

impl<const N: usize> Default for Debouncer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Debouncer<N> {
    const FITS_MASK: () = assert!(N <= 32, "a debouncer tracks at most 32 keys");

    /// Create a debouncer with all keys released
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS_MASK;

        Self {
            stable: 0,
            previous: 0,
            counters: [0; N],
        }
    }

    /// Feed one raw sample (bit set = pressed) and return the stable mask
    ///
    /// Bits at or above `N` are ignored.
    pub fn update(&mut self, raw: u32) -> u32 {
        self.previous = self.stable;

        for (key, counter) in self.counters.iter_mut().enumerate() {
            let mask = 1u32 << key;

            if raw & mask != 0 {
                if *counter < DEBOUNCE_MAX {
                    *counter += 1;
                }
            } else if *counter > 0 {
                *counter -= 1;
            }

            if *counter == DEBOUNCE_MAX {
                self.stable |= mask;
            } else if *counter == 0 {
                self.stable &= !mask;
            }
        }

        self.stable
    }

    /// Current stable mask
    pub fn stable(&self) -> u32 {
        self.stable
    }

    /// Keys that became pressed in the last update
    pub fn pressed(&self) -> u32 {
        self.stable & !self.previous
    }

    /// Keys that became released in the last update
    pub fn released(&self) -> u32 {
        self.previous & !self.stable
    }

    /// Counter value of one key, `None` if out of range
    pub fn counter(&self, key: usize) -> Option<u8> {
        self.counters.get(key).copied()
    }

    /// Forget all history and release every key
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_press_after_max_samples() {
        let mut db = Debouncer::<8>::new();

        for _ in 0..DEBOUNCE_MAX - 1 {
            assert_eq!(db.update(0x01), 0);
        }
        assert_eq!(db.update(0x01), 0x01);
        assert_eq!(db.pressed(), 0x01);
        assert_eq!(db.counter(0), Some(DEBOUNCE_MAX));
    }

    #[test]
    fn test_release_after_max_samples() {
        let mut db = Debouncer::<8>::new();
        for _ in 0..DEBOUNCE_MAX {
            db.update(0x80);
        }
        assert_eq!(db.stable(), 0x80);

        for _ in 0..DEBOUNCE_MAX - 1 {
            assert_eq!(db.update(0), 0x80);
        }
        assert_eq!(db.update(0), 0);
        assert_eq!(db.released(), 0x80);
        assert_eq!(db.pressed(), 0);
    }

    #[test]
    fn test_bounce_absorbed() {
        let mut db = Debouncer::<8>::new();

        // Counter 1, 2, 3, 2, 3: never reaches the top
        for raw in [1, 1, 1, 0, 1] {
            assert_eq!(db.update(raw), 0);
        }
        assert_eq!(db.counter(0), Some(3));

        // One more pressed sample settles it
        assert_eq!(db.update(1), 1);
    }

    #[test]
    fn test_hysteresis_holds_pressed() {
        let mut db = Debouncer::<8>::new();
        for _ in 0..DEBOUNCE_MAX {
            db.update(0x04);
        }

        // Drops to 1 but never 0: stays pressed
        for raw in [0, 0, 0, 0x04, 0] {
            assert_eq!(db.update(raw), 0x04);
        }
        assert_eq!(db.counter(2), Some(1));
    }

    #[test]
    fn test_counter_saturates() {
        let mut db = Debouncer::<8>::new();
        for _ in 0..20 {
            db.update(0xFF);
        }
        assert_eq!(db.counter(3), Some(DEBOUNCE_MAX));

        for _ in 0..20 {
            db.update(0);
        }
        assert_eq!(db.counter(3), Some(0));
        assert_eq!(db.counter(8), None);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut db = Debouncer::<8>::new();
        db.update(0b01);
        db.update(0b01);
        db.update(0b11);
        assert_eq!(db.update(0b11), 0b01);
        assert_eq!(db.pressed(), 0b01);
    }

    #[test]
    fn test_bits_beyond_width_ignored() {
        let mut db = Debouncer::<4>::new();
        for _ in 0..DEBOUNCE_MAX {
            db.update(0xF0);
        }
        assert_eq!(db.stable(), 0);
    }

    #[test]
    fn test_full_width() {
        let mut db = Debouncer::<32>::new();
        for _ in 0..DEBOUNCE_MAX {
            db.update(u32::MAX);
        }
        assert_eq!(db.stable(), u32::MAX);
    }

    #[test]
    fn test_reset() {
        let mut db = Debouncer::<8>::new();
        for _ in 0..DEBOUNCE_MAX {
            db.update(0xFF);
        }
        db.reset();
        assert_eq!(db.stable(), 0);
        assert_eq!(db.counter(0), Some(0));
    }

    proptest! {
        /// Replays the counter rules for key 0 and checks the filter agrees
        #[test]
        fn prop_stable_tracks_counter_extremes(samples in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut db = Debouncer::<1>::new();
            let mut counter = 0u8;
            let mut stable = false;

            for pressed in samples {
                counter = if pressed {
                    (counter + 1).min(DEBOUNCE_MAX)
                } else {
                    counter.saturating_sub(1)
                };
                if counter == DEBOUNCE_MAX {
                    stable = true;
                } else if counter == 0 {
                    stable = false;
                }

                let out = db.update(pressed as u32);
                prop_assert!(db.counter(0).unwrap() <= DEBOUNCE_MAX);
                prop_assert_eq!(out & 1 != 0, stable);
            }
        }

        /// Runs shorter than DEBOUNCE_MAX never flip a released key
        #[test]
        fn prop_short_runs_never_press(runs in proptest::collection::vec(1..DEBOUNCE_MAX, 0..16)) {
            let mut db = Debouncer::<1>::new();
            for run in runs {
                for _ in 0..run {
                    prop_assert_eq!(db.update(1), 0);
                }
                // Drain back to zero before the next burst
                for _ in 0..run {
                    prop_assert_eq!(db.update(0), 0);
                }
            }
        }
    }
}
