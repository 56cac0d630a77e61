//! Deck motor driver for an H-bridge output stage
//!
//! This driver provides:
//! - Translation from a motor command to the raise/lower input pair
//! - Duty cycle clamping (0-100%)
//! - A dead-time window with both inputs off when the direction reverses
//!
//! # Usage
//!
//! The driver is updated by calling `update()` periodically (typically every
//! 10 ms). This returns the level pair to apply to the two PWM outputs.
//!
//! ```ignore
//! let mut motor = DeckMotor::new(DeckMotorConfig::default());
//! motor.command(MotorCommand::raise(100));
//!
//! // In the periodic motor task:
//! let levels = motor.update(10);
//! pwm.set_duty_a(levels.raise_pct);
//! pwm.set_duty_b(levels.lower_pct);
//! ```

use bascule_core::command::{Direction, MotorCommand};

/// Deck motor driver configuration
#[derive(Debug, Clone)]
pub struct DeckMotorConfig {
    /// Minimum time in ms with both bridge inputs off between
    /// opposing drive directions
    pub reversal_dead_time_ms: u16,
}

impl Default for DeckMotorConfig {
    fn default() -> Self {
        Self {
            reversal_dead_time_ms: 200,
        }
    }
}

/// H-bridge input pair
///
/// At most one side is ever nonzero; driving both would short the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveLevels {
    /// Duty on the raise input (0-100)
    pub raise_pct: u8,
    /// Duty on the lower input (0-100)
    pub lower_pct: u8,
}

impl DriveLevels {
    /// Both inputs off
    pub const fn off() -> Self {
        Self {
            raise_pct: 0,
            lower_pct: 0,
        }
    }

    /// Check whether both inputs are off
    pub fn is_off(&self) -> bool {
        self.raise_pct == 0 && self.lower_pct == 0
    }
}

/// What the driver put on the bridge inputs at the last update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrivePhase {
    /// Both inputs off, no drive pending
    Off,
    /// Driving the commanded direction
    Driving,
    /// Both inputs held off before a direction reversal
    DeadTime,
}

/// Deck motor driver state
///
/// The controller publishes a `MotorCommand` per tick; the motor task
/// stores it with [`DeckMotor::command`] and calls [`DeckMotor::update`]
/// on its own period. A commanded stop takes effect on the next update;
/// a commanded reversal is only driven once the outputs have been off
/// for the configured dead time.
pub struct DeckMotor {
    config: DeckMotorConfig,
    /// Latest commanded drive
    target: MotorCommand,
    /// Direction of the last nonzero output, if any
    last_direction: Option<Direction>,
    /// Time accumulated with both outputs off since the last nonzero output
    off_ms: u32,
    /// Phase reported by the last update
    phase: DrivePhase,
}

impl DeckMotor {
    /// Create a new deck motor driver, stopped
    pub fn new(config: DeckMotorConfig) -> Self {
        Self {
            config,
            target: MotorCommand::stopped(),
            last_direction: None,
            off_ms: 0,
            phase: DrivePhase::Off,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &DeckMotorConfig {
        &self.config
    }

    /// Get the phase produced by the last update
    pub fn phase(&self) -> DrivePhase {
        self.phase
    }

    /// Store a new commanded drive
    ///
    /// The duty cycle is clamped to 100%. The command takes effect on the
    /// next `update()` call.
    pub fn command(&mut self, cmd: MotorCommand) {
        self.target = MotorCommand {
            duty_pct: cmd.duty_pct.min(100),
            direction: cmd.direction,
        };
    }

    fn levels_for(cmd: MotorCommand) -> DriveLevels {
        match cmd.direction {
            Direction::Raise => DriveLevels {
                raise_pct: cmd.duty_pct,
                lower_pct: 0,
            },
            Direction::Lower => DriveLevels {
                raise_pct: 0,
                lower_pct: cmd.duty_pct,
            },
        }
    }

    /// Advance the driver by `delta_ms` and return the levels to apply
    ///
    /// A stop command cuts both outputs on this update. A direction
    /// reversal is held at both-off until the outputs have been off for
    /// at least the configured dead time.
    pub fn update(&mut self, delta_ms: u32) -> DriveLevels {
        if self.target.is_stopped() {
            self.off_ms = self.off_ms.saturating_add(delta_ms);
            self.phase = DrivePhase::Off;
            return DriveLevels::off();
        }

        let reversing = self
            .last_direction
            .is_some_and(|last| last != self.target.direction);
        if reversing && self.off_ms < self.config.reversal_dead_time_ms as u32 {
            self.off_ms = self.off_ms.saturating_add(delta_ms);
            self.phase = DrivePhase::DeadTime;
            return DriveLevels::off();
        }

        self.last_direction = Some(self.target.direction);
        self.off_ms = 0;
        self.phase = DrivePhase::Driving;
        Self::levels_for(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DELTA: u32 = 10;

    fn motor() -> DeckMotor {
        DeckMotor::new(DeckMotorConfig {
            reversal_dead_time_ms: 200,
        })
    }

    #[test]
    fn test_initial_state() {
        let mut m = motor();
        assert_eq!(m.phase(), DrivePhase::Off);
        assert_eq!(m.update(DELTA), DriveLevels::off());
        assert_eq!(m.phase(), DrivePhase::Off);
    }

    #[test]
    fn test_drive_raise() {
        let mut m = motor();
        m.command(MotorCommand::raise(100));

        let levels = m.update(DELTA);
        assert_eq!(
            levels,
            DriveLevels {
                raise_pct: 100,
                lower_pct: 0
            }
        );
        assert_eq!(m.phase(), DrivePhase::Driving);
    }

    #[test]
    fn test_drive_lower() {
        let mut m = motor();
        m.command(MotorCommand::lower(80));

        let levels = m.update(DELTA);
        assert_eq!(
            levels,
            DriveLevels {
                raise_pct: 0,
                lower_pct: 80
            }
        );
    }

    #[test]
    fn test_stop_is_immediate() {
        let mut m = motor();
        m.command(MotorCommand::raise(100));
        m.update(DELTA);

        m.command(MotorCommand::stopped());
        assert_eq!(m.update(DELTA), DriveLevels::off());
        assert_eq!(m.phase(), DrivePhase::Off);
    }

    #[test]
    fn test_duty_clamped() {
        let mut m = motor();
        m.command(MotorCommand {
            duty_pct: 180,
            direction: Direction::Lower,
        });

        let levels = m.update(DELTA);
        assert_eq!(levels.lower_pct, 100);
    }

    #[test]
    fn test_reversal_inserts_dead_time() {
        let mut m = motor();
        m.command(MotorCommand::raise(100));
        m.update(DELTA);

        m.command(MotorCommand::lower(100));

        // 200 ms of dead time at 10 ms per update
        for _ in 0..20 {
            assert_eq!(m.update(DELTA), DriveLevels::off());
            assert_eq!(m.phase(), DrivePhase::DeadTime);
        }

        let levels = m.update(DELTA);
        assert_eq!(levels.lower_pct, 100);
        assert_eq!(m.phase(), DrivePhase::Driving);
    }

    #[test]
    fn test_stop_counts_toward_dead_time() {
        let mut m = motor();
        m.command(MotorCommand::raise(100));
        m.update(DELTA);

        // 100 ms stopped, then a reversal: only 100 ms of dead time left
        m.command(MotorCommand::stopped());
        for _ in 0..10 {
            m.update(DELTA);
        }

        m.command(MotorCommand::lower(100));
        for _ in 0..10 {
            assert_eq!(m.update(DELTA), DriveLevels::off());
        }
        assert_eq!(m.update(DELTA).lower_pct, 100);
    }

    #[test]
    fn test_reverse_after_long_stop_is_immediate() {
        let mut m = motor();
        m.command(MotorCommand::raise(100));
        m.update(DELTA);

        m.command(MotorCommand::stopped());
        for _ in 0..30 {
            m.update(DELTA);
        }

        m.command(MotorCommand::lower(100));
        assert_eq!(m.update(DELTA).lower_pct, 100);
    }

    #[test]
    fn test_same_direction_resume_is_immediate() {
        let mut m = motor();
        m.command(MotorCommand::raise(100));
        m.update(DELTA);

        m.command(MotorCommand::stopped());
        m.update(DELTA);

        m.command(MotorCommand::raise(100));
        assert_eq!(m.update(DELTA).raise_pct, 100);
    }

    #[test]
    fn test_command_flip_during_dead_time() {
        let mut m = motor();
        m.command(MotorCommand::raise(100));
        m.update(DELTA);

        // Reversal starts the dead window, then the command flips back
        m.command(MotorCommand::lower(100));
        for _ in 0..5 {
            m.update(DELTA);
        }
        m.command(MotorCommand::raise(100));

        // Same direction as the last nonzero output, so drive resumes
        assert_eq!(m.update(DELTA).raise_pct, 100);
    }

    proptest! {
        /// Whatever sequence of commands arrives, the two bridge inputs
        /// are never driven together, and opposing directions are always
        /// separated by at least the configured dead time of off output.
        #[test]
        fn prop_levels_exclusive_and_reversals_spaced(
            commands in proptest::collection::vec(
                (0u8..=3, 0u8..=150, 1usize..=30),
                1..40,
            ),
        ) {
            let dead_time = 200u32;
            let mut m = DeckMotor::new(DeckMotorConfig {
                reversal_dead_time_ms: dead_time as u16,
            });

            let mut now = 0u32;
            let mut last_nonzero: Option<(Direction, u32)> = None;

            for (kind, duty, updates) in commands {
                let cmd = match kind {
                    0 => MotorCommand::stopped(),
                    1 => MotorCommand::raise(duty),
                    2 => MotorCommand::lower(duty),
                    _ => MotorCommand { duty_pct: duty, direction: Direction::Raise },
                };
                m.command(cmd);

                for _ in 0..updates {
                    now += DELTA;
                    let levels = m.update(DELTA);
                    prop_assert!(!(levels.raise_pct > 0 && levels.lower_pct > 0));

                    if !levels.is_off() {
                        let dir = if levels.raise_pct > 0 {
                            Direction::Raise
                        } else {
                            Direction::Lower
                        };
                        if let Some((last_dir, last_at)) = last_nonzero {
                            if last_dir != dir {
                                prop_assert!(now - last_at > dead_time);
                            }
                        }
                        last_nonzero = Some((dir, now));
                    }
                }
            }
        }
    }
}
