//! Limit-switch safety interlock
//!
//! The end-of-travel switches are a hard interlock, not a convenience
//! signal: every motor command leaves the controller through [`LimitInterlock::gate`],
//! automatic or manual, so travel past a reached limit is structurally
//! impossible.

use crate::command::{Direction, MotorCommand};
use crate::filter::DebouncedInput;

/// Debounced end-of-travel interlock for both limit switches
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LimitInterlock {
    top: DebouncedInput,
    bottom: DebouncedInput,
}

impl LimitInterlock {
    /// Create an interlock with both switches initially released
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            top: DebouncedInput::new(false, debounce_ms),
            bottom: DebouncedInput::new(false, debounce_ms),
        }
    }

    /// Feed the raw switch levels (logical: true = end of travel reached)
    pub fn update(&mut self, top_raw: bool, bottom_raw: bool, now_ms: u32) {
        self.top.update(top_raw, now_ms);
        self.bottom.update(bottom_raw, now_ms);
    }

    /// Debounced top-limit state (deck fully open)
    pub fn top_reached(&self) -> bool {
        self.top.value()
    }

    /// Debounced bottom-limit state (deck fully seated)
    pub fn bottom_reached(&self) -> bool {
        self.bottom.value()
    }

    /// True if both switches read reached at once (wiring or mechanical fault)
    pub fn conflicted(&self) -> bool {
        self.top.value() && self.bottom.value()
    }

    /// Mask a motor command against the reached limits
    ///
    /// Drive into a reached limit degrades to a stop; drive away from it
    /// passes unchanged.
    pub fn gate(&self, cmd: MotorCommand) -> MotorCommand {
        match cmd.direction {
            Direction::Raise if self.top.value() => MotorCommand::stopped(),
            Direction::Lower if self.bottom.value() => MotorCommand::stopped(),
            _ => cmd,
        }
    }
}
