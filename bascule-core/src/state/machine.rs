//! Deck state machine
//!
//! All motor and safety-light behavior is a function of the current state
//! and one tick's conditioned inputs. Each variant handler returns the
//! next state plus the commands for this tick, so the transition table
//! stays explicit and testable without hardware.
//!
//! The machine only ever sees conditioned values: held distances and
//! debounced limits. The caller applies the limit interlock to the motor
//! command afterwards; handlers here express intent, the interlock has the
//! final word.

use crate::command::{LightPattern, ManualAction, MotorCommand, OverrideCommand};
use crate::config::BridgeConfig;

use super::events::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which approach sensor tripped the detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Approach {
    /// Front (road-side) sensor
    Front,
    /// Back (channel-side) sensor
    Back,
}

/// Deck states
///
/// Exactly one is active; transitions happen only at control ticks and at
/// most one transition happens per tick. Timed states carry their own
/// start stamp so a dwell can never leak across states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeckState {
    /// Deck seated, road open, no boat traffic
    Idle,
    /// Boat detected; road traffic drains while the buffer dwell runs
    BoatApproaching { approach: Approach, since_ms: u32 },
    /// Deck rising towards the top limit
    Opening { approach: Approach },
    /// Deck fully open, holding until the boat clears the exit side
    ///
    /// `approach` is None when the deck was left open under override and
    /// no boat direction is on record.
    Waiting {
        approach: Option<Approach>,
        since_ms: u32,
    },
    /// Deck lowering towards the bottom limit
    Closing,
    /// Operator override: motor follows the requested action
    Manual,
}

/// Conditioned inputs for one tick
///
/// Distances are last-good held values, limits are debounced, and the
/// override slot has been snapshotted exactly once before the tick.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepContext {
    /// Monotonic millisecond clock
    pub now_ms: u32,
    /// Held front distance (None = never measured)
    pub front_cm: Option<u16>,
    /// Held back distance (None = never measured)
    pub back_cm: Option<u16>,
    /// Debounced top limit (true = deck fully open)
    pub top_limit: bool,
    /// Debounced bottom limit (true = deck fully seated)
    pub bottom_limit: bool,
    /// Override slot snapshot
    pub overrides: OverrideCommand,
}

/// One tick's outcome: next state plus the commands emitted this tick
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepResult {
    pub next: DeckState,
    pub motor: MotorCommand,
    pub light: LightPattern,
    pub event: Option<Event>,
}

impl DeckState {
    /// Check if the operator override is active
    pub fn is_manual(&self) -> bool {
        matches!(self, DeckState::Manual)
    }

    /// Check if this state drives the deck
    pub fn in_motion(&self) -> bool {
        matches!(self, DeckState::Opening { .. } | DeckState::Closing)
    }

    /// Wire code for the status report
    pub fn code(&self) -> u8 {
        match self {
            DeckState::Idle => 0,
            DeckState::BoatApproaching { .. } => 1,
            DeckState::Opening { .. } => 2,
            DeckState::Waiting { .. } => 3,
            DeckState::Closing => 4,
            DeckState::Manual => 5,
        }
    }

    /// Evaluate one control tick
    ///
    /// This is the core transition logic. The override is checked before
    /// any per-state handler so engaging it preempts the automatic cycle
    /// on the same tick.
    pub fn step(self, ctx: &StepContext, config: &BridgeConfig) -> StepResult {
        if ctx.overrides.engaged {
            return self.step_manual(ctx, config);
        }

        match self {
            DeckState::Idle => Self::step_idle(ctx, config),
            DeckState::BoatApproaching { approach, since_ms } => {
                Self::step_approaching(approach, since_ms, ctx, config)
            }
            DeckState::Opening { approach } => Self::step_opening(approach, ctx, config),
            DeckState::Waiting { approach, since_ms } => {
                Self::step_waiting(approach, since_ms, ctx, config)
            }
            DeckState::Closing => Self::step_closing(ctx, config),
            DeckState::Manual => Self::step_resume(ctx, config),
        }
    }

    /// Override engaged: motor follows the requested action directly
    fn step_manual(self, ctx: &StepContext, config: &BridgeConfig) -> StepResult {
        let (motor, light) = match ctx.overrides.action {
            ManualAction::Open => (
                MotorCommand::raise(config.raise_duty_pct),
                LightPattern::Blink,
            ),
            ManualAction::Close => (
                MotorCommand::lower(config.lower_duty_pct),
                LightPattern::Blink,
            ),
            ManualAction::Stop => (MotorCommand::stopped(), LightPattern::Solid),
            ManualAction::Standby => (MotorCommand::stopped(), LightPattern::Off),
        };

        let event = if self.is_manual() {
            None
        } else {
            Some(Event::OverrideEngaged {
                action: ctx.overrides.action,
            })
        };

        StepResult {
            next: DeckState::Manual,
            motor,
            light,
            event,
        }
    }

    /// Override released while in Manual: pick the automatic state from
    /// the debounced limits, never from remembered motion
    fn step_resume(ctx: &StepContext, config: &BridgeConfig) -> StepResult {
        let (next, motor, light) = if ctx.bottom_limit {
            (DeckState::Idle, MotorCommand::stopped(), LightPattern::Off)
        } else if ctx.top_limit {
            // No boat direction on record, so Waiting falls back to the
            // both-sides clearance check
            (
                DeckState::Waiting {
                    approach: None,
                    since_ms: ctx.now_ms,
                },
                MotorCommand::stopped(),
                LightPattern::Solid,
            )
        } else {
            // Mid-travel: re-seat the deck through the normal closing path
            (
                DeckState::Closing,
                MotorCommand::lower(config.lower_duty_pct),
                LightPattern::Blink,
            )
        };

        StepResult {
            next,
            motor,
            light,
            event: Some(Event::OverrideReleased),
        }
    }

    fn step_idle(ctx: &StepContext, config: &BridgeConfig) -> StepResult {
        let near = |reading: Option<u16>| {
            reading.is_some_and(|cm| cm < config.approach_threshold_cm)
        };

        // Front is evaluated first: simultaneous detections record a
        // front approach
        let approach = if near(ctx.front_cm) {
            Some(Approach::Front)
        } else if near(ctx.back_cm) {
            Some(Approach::Back)
        } else {
            None
        };

        match approach {
            Some(approach) => StepResult {
                next: DeckState::BoatApproaching {
                    approach,
                    since_ms: ctx.now_ms,
                },
                motor: MotorCommand::stopped(),
                light: LightPattern::Solid,
                event: Some(Event::BoatDetected { approach }),
            },
            None => StepResult {
                next: DeckState::Idle,
                motor: MotorCommand::stopped(),
                light: LightPattern::Off,
                event: None,
            },
        }
    }

    /// Buffer dwell before opening; committed, so lost detection does not
    /// de-escalate
    fn step_approaching(
        approach: Approach,
        since_ms: u32,
        ctx: &StepContext,
        config: &BridgeConfig,
    ) -> StepResult {
        if ctx.now_ms.wrapping_sub(since_ms) > config.approach_buffer_ms {
            StepResult {
                next: DeckState::Opening { approach },
                motor: MotorCommand::raise(config.raise_duty_pct),
                light: LightPattern::Blink,
                event: Some(Event::OpeningStarted),
            }
        } else {
            StepResult {
                next: DeckState::BoatApproaching { approach, since_ms },
                motor: MotorCommand::stopped(),
                light: LightPattern::Blink,
                event: None,
            }
        }
    }

    fn step_opening(approach: Approach, ctx: &StepContext, config: &BridgeConfig) -> StepResult {
        if ctx.top_limit {
            StepResult {
                next: DeckState::Waiting {
                    approach: Some(approach),
                    since_ms: ctx.now_ms,
                },
                motor: MotorCommand::stopped(),
                light: LightPattern::Solid,
                event: Some(Event::DeckOpened),
            }
        } else {
            StepResult {
                next: DeckState::Opening { approach },
                motor: MotorCommand::raise(config.raise_duty_pct),
                light: LightPattern::Blink,
                event: None,
            }
        }
    }

    fn step_waiting(
        approach: Option<Approach>,
        since_ms: u32,
        ctx: &StepContext,
        config: &BridgeConfig,
    ) -> StepResult {
        let clear =
            |reading: Option<u16>| reading.is_some_and(|cm| cm > config.clear_threshold_cm);

        // The boat exits on the side opposite its approach, so that is
        // the reading that must clear; a fresh arrival queued on the
        // approach side must not hold the deck open. An unknown reading
        // is never "clear"; the max-wait deadline is the escape for a
        // sensor gone quiet.
        let channel_clear = match approach {
            Some(Approach::Front) => clear(ctx.back_cm),
            Some(Approach::Back) => clear(ctx.front_cm),
            None => clear(ctx.front_cm) && clear(ctx.back_cm),
        };

        if channel_clear {
            StepResult {
                next: DeckState::Closing,
                motor: MotorCommand::lower(config.lower_duty_pct),
                light: LightPattern::Blink,
                event: Some(Event::ChannelCleared),
            }
        } else if ctx.now_ms.wrapping_sub(since_ms) > config.max_wait_ms {
            StepResult {
                next: DeckState::Closing,
                motor: MotorCommand::lower(config.lower_duty_pct),
                light: LightPattern::Blink,
                event: Some(Event::WaitExpired),
            }
        } else {
            StepResult {
                next: DeckState::Waiting { approach, since_ms },
                motor: MotorCommand::stopped(),
                light: LightPattern::Solid,
                event: None,
            }
        }
    }

    fn step_closing(ctx: &StepContext, config: &BridgeConfig) -> StepResult {
        if ctx.bottom_limit {
            StepResult {
                next: DeckState::Idle,
                motor: MotorCommand::stopped(),
                light: LightPattern::Off,
                event: Some(Event::DeckSeated),
            }
        } else {
            StepResult {
                next: DeckState::Closing,
                motor: MotorCommand::lower(config.lower_duty_pct),
                light: LightPattern::Blink,
                event: None,
            }
        }
    }
}
