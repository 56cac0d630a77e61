//! Motor, light and override command types
//!
//! These are the values that cross the controller's boundary every tick:
//! the motor and light commands it emits, and the override slot the remote
//! interface writes into.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Drive direction of the deck actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Deck travelling up (towards the top limit)
    Raise,
    /// Deck travelling down (towards the bottom limit)
    Lower,
}

/// Motor command emitted by the controller
///
/// A single direction plus duty: the two H-bridge sides can never be
/// commanded hot at the same time because there is only one direction
/// field to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    /// Drive duty in percent (0 = stopped)
    pub duty_pct: u8,
    /// Drive direction (meaningless while stopped)
    pub direction: Direction,
}

impl MotorCommand {
    /// Create a stopped command
    pub const fn stopped() -> Self {
        Self {
            duty_pct: 0,
            direction: Direction::Raise,
        }
    }

    /// Create an upward drive command
    pub const fn raise(duty_pct: u8) -> Self {
        Self {
            duty_pct,
            direction: Direction::Raise,
        }
    }

    /// Create a downward drive command
    pub const fn lower(duty_pct: u8) -> Self {
        Self {
            duty_pct,
            direction: Direction::Lower,
        }
    }

    /// True if no drive is commanded
    pub fn is_stopped(&self) -> bool {
        self.duty_pct == 0
    }
}

/// Safety light pattern commanded by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LightPattern {
    /// Light off (deck seated, no traffic)
    #[default]
    Off,
    /// Light on continuously
    Solid,
    /// Light flashing (deck in motion or boat awaited)
    Blink,
}

impl LightPattern {
    /// True for any pattern that shows the light (solid or blinking)
    pub fn is_asserted(&self) -> bool {
        !matches!(self, LightPattern::Off)
    }
}

/// Operator-requested action while the override is engaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ManualAction {
    /// Raise the deck (bounded by the top limit)
    Open,
    /// Lower the deck (bounded by the bottom limit)
    Close,
    /// Hold the deck where it is, light on
    #[default]
    Stop,
    /// Hold the deck, light off
    Standby,
}

/// Cross-context override slot value
///
/// Written by the remote interface between ticks, snapshotted exactly once
/// at the start of each control tick. The controller never writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OverrideCommand {
    /// True while the operator has taken manual control
    pub engaged: bool,
    /// Last requested manual action (retained after release)
    pub action: ManualAction,
}

impl OverrideCommand {
    /// Automatic mode: override released
    pub const fn released() -> Self {
        Self {
            engaged: false,
            action: ManualAction::Stop,
        }
    }

    /// Manual mode with the given action
    pub const fn manual(action: ManualAction) -> Self {
        Self {
            engaged: true,
            action,
        }
    }
}

impl Default for OverrideCommand {
    fn default() -> Self {
        Self::released()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_command() {
        let cmd = MotorCommand::stopped();
        assert!(cmd.is_stopped());
        assert_eq!(cmd.duty_pct, 0);
    }

    #[test]
    fn test_directional_commands() {
        let up = MotorCommand::raise(80);
        assert_eq!(up.direction, Direction::Raise);
        assert!(!up.is_stopped());

        let down = MotorCommand::lower(100);
        assert_eq!(down.direction, Direction::Lower);
        assert_eq!(down.duty_pct, 100);
    }

    #[test]
    fn test_zero_duty_is_stopped() {
        // A directional command at zero duty is still a stop
        assert!(MotorCommand::raise(0).is_stopped());
        assert!(MotorCommand::lower(0).is_stopped());
    }

    #[test]
    fn test_light_assertion() {
        assert!(!LightPattern::Off.is_asserted());
        assert!(LightPattern::Solid.is_asserted());
        assert!(LightPattern::Blink.is_asserted());
    }

    #[test]
    fn test_override_constructors() {
        let released = OverrideCommand::released();
        assert!(!released.engaged);

        let manual = OverrideCommand::manual(ManualAction::Open);
        assert!(manual.engaged);
        assert_eq!(manual.action, ManualAction::Open);
    }
}
