//! Transition events emitted by the deck state machine
//!
//! At most one event is produced per tick; the firmware logs them and the
//! console can mirror them. They carry no control authority of their own.

use crate::command::ManualAction;

use super::machine::Approach;

/// Events describing deck state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Automatic cycle
    /// A boat tripped an approach sensor; the open cycle is committed
    BoatDetected { approach: Approach },
    /// Approach buffer expired; deck starting to rise
    OpeningStarted,
    /// Top limit reached; deck holding open
    DeckOpened,
    /// Both approaches read clear; deck starting to lower
    ChannelCleared,
    /// Open-hold deadline passed without clear readings; closing anyway
    WaitExpired,
    /// Bottom limit reached; cycle complete
    DeckSeated,

    // Operator override
    /// Remote took manual control
    OverrideEngaged { action: ManualAction },
    /// Remote returned the bridge to automatic control
    OverrideReleased,
}

impl Event {
    /// Check if this event came from the operator override
    pub fn is_override_event(&self) -> bool {
        matches!(self, Event::OverrideEngaged { .. } | Event::OverrideReleased)
    }

    /// Check if this event starts deck motion
    pub fn starts_motion(&self) -> bool {
        matches!(
            self,
            Event::OpeningStarted | Event::ChannelCleared | Event::WaitExpired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_events() {
        assert!(Event::OverrideEngaged {
            action: ManualAction::Open
        }
        .is_override_event());
        assert!(Event::OverrideReleased.is_override_event());
        assert!(!Event::DeckSeated.is_override_event());
    }

    #[test]
    fn test_motion_start_events() {
        assert!(Event::OpeningStarted.starts_motion());
        assert!(Event::ChannelCleared.starts_motion());
        assert!(Event::WaitExpired.starts_motion());
        assert!(!Event::BoatDetected {
            approach: Approach::Front
        }
        .starts_motion());
        assert!(!Event::DeckOpened.starts_motion());
    }
}
