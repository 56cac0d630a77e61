//! Input conditioning filters
//!
//! Two small stateful filters sit between raw hardware and the state
//! machine: a timestamp debounce for the limit switches and a last-good
//! hold for the ultrasonic rangers. The state machine never evaluates a
//! raw level or a missed echo directly.

/// Debounced digital input
///
/// A raw level change restarts the hold-off window; the stable value only
/// follows the raw level once it has stayed unchanged for the full
/// debounce interval. Timestamps are u32 milliseconds with wrapping
/// arithmetic, so the filter survives the ~49 day clock rollover.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebouncedInput {
    interval_ms: u32,
    last_raw: bool,
    stable: bool,
    changed_at_ms: u32,
}

impl DebouncedInput {
    /// Create a filter with a known initial level
    pub const fn new(initial: bool, interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_raw: initial,
            stable: initial,
            changed_at_ms: 0,
        }
    }

    /// Feed the current raw level; returns the debounced value
    pub fn update(&mut self, raw: bool, now_ms: u32) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.changed_at_ms = now_ms;
        } else if raw != self.stable
            && now_ms.wrapping_sub(self.changed_at_ms) >= self.interval_ms
        {
            self.stable = raw;
        }
        self.stable
    }

    /// Last debounced value without feeding a new sample
    pub fn value(&self) -> bool {
        self.stable
    }
}

/// Last-good hold for a range reading
///
/// A missed echo (`None`) or a zero reading keeps the previous value. The
/// held value starts unknown, so a sensor that has never answered can
/// never look like a nearby boat.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeHold {
    last: Option<u16>,
}

impl RangeHold {
    /// Create an empty hold (no reading yet)
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Feed the latest measurement, if any; returns the held value
    pub fn update(&mut self, reading: Option<u16>) -> Option<u16> {
        if let Some(cm) = reading {
            if cm > 0 {
                self.last = Some(cm);
            }
        }
        self.last
    }

    /// Current held value
    pub fn value(&self) -> Option<u16> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DEBOUNCE_MS: u32 = 50;

    #[test]
    fn test_initial_value_is_stable() {
        let mut input = DebouncedInput::new(false, DEBOUNCE_MS);
        assert!(!input.value());
        assert!(!input.update(false, 10));
    }

    #[test]
    fn test_bounce_within_interval_never_updates() {
        let mut input = DebouncedInput::new(false, DEBOUNCE_MS);

        // LOW,HIGH,LOW,HIGH all inside 50ms of the previous change
        assert!(!input.update(true, 100));
        assert!(!input.update(false, 120));
        assert!(!input.update(true, 140));
        assert!(!input.update(false, 160));
        assert!(!input.value());
    }

    #[test]
    fn test_level_held_past_interval_promotes() {
        let mut input = DebouncedInput::new(false, DEBOUNCE_MS);

        input.update(true, 100);
        // Still inside the window
        assert!(!input.update(true, 140));
        // Held unchanged for 60ms: promoted
        assert!(input.update(true, 160));
        assert!(input.value());
    }

    #[test]
    fn test_promotion_at_exact_interval() {
        let mut input = DebouncedInput::new(false, DEBOUNCE_MS);

        input.update(true, 1000);
        assert!(input.update(true, 1050));
    }

    #[test]
    fn test_release_debounced_same_as_press() {
        let mut input = DebouncedInput::new(true, DEBOUNCE_MS);

        input.update(false, 200);
        assert!(input.update(false, 230));
        assert!(!input.update(false, 260));
    }

    #[test]
    fn test_clock_wraparound() {
        let mut input = DebouncedInput::new(false, DEBOUNCE_MS);

        // Change just before the u32 clock wraps
        input.update(true, u32::MAX - 10);
        assert!(!input.update(true, u32::MAX));
        // 60ms after the change, past the wrap
        assert!(input.update(true, 49));
    }

    #[test]
    fn test_range_hold_starts_unknown() {
        let hold = RangeHold::new();
        assert_eq!(hold.value(), None);
    }

    #[test]
    fn test_range_hold_keeps_last_good() {
        let mut hold = RangeHold::new();
        assert_eq!(hold.update(Some(35)), Some(35));
        // Missed echo does not erase the reading
        assert_eq!(hold.update(None), Some(35));
        assert_eq!(hold.update(Some(18)), Some(18));
    }

    #[test]
    fn test_range_hold_rejects_zero() {
        let mut hold = RangeHold::new();
        hold.update(Some(42));
        // A zero is a failed measurement, not a boat at the transducer
        assert_eq!(hold.update(Some(0)), Some(42));
    }

    proptest! {
        /// A level that flips on every sample is never promoted, whatever
        /// the spacing: promotion needs a confirming sample of an
        /// unchanged level.
        #[test]
        fn prop_alternating_samples_never_promote(
            gaps in proptest::collection::vec(1u32..10_000, 1..40),
        ) {
            let mut input = DebouncedInput::new(false, DEBOUNCE_MS);
            let mut now = 0u32;
            let mut raw = false;

            for gap in gaps {
                now = now.wrapping_add(gap);
                raw = !raw;
                input.update(raw, now);
            }

            prop_assert!(!input.value());
        }

        /// Any level held for a full interval is always promoted.
        #[test]
        fn prop_held_level_promotes(start in any::<u32>(), hold in DEBOUNCE_MS..10_000u32) {
            let mut input = DebouncedInput::new(false, DEBOUNCE_MS);
            input.update(true, start);
            input.update(true, start.wrapping_add(hold));
            prop_assert!(input.value());
        }
    }
}
