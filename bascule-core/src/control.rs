//! Control loop core
//!
//! [`BridgeController`] owns the input conditioning (range holds, limit
//! debounce) and the deck state machine. The caller hands it one raw
//! snapshot per tick and applies the returned motor and light commands;
//! hardware access stays entirely at the edges.

use crate::command::{LightPattern, MotorCommand, OverrideCommand};
use crate::config::BridgeConfig;
use crate::filter::RangeHold;
use crate::safety::LimitInterlock;
use crate::state::{DeckState, Event, StepContext};
use crate::status::StatusSnapshot;

/// Raw per-tick snapshot handed to the controller
///
/// Limit levels are raw samples with polarity already normalized (true =
/// end of travel reached); distance fields carry a fresh sounding if one
/// completed since the previous tick, `None` otherwise. The override slot
/// must be read exactly once, before building this snapshot.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInputs {
    /// Monotonic millisecond clock
    pub now_ms: u32,
    /// Fresh front sounding (None = no echo or no new sounding)
    pub front_cm: Option<u16>,
    /// Fresh back sounding (None = no echo or no new sounding)
    pub back_cm: Option<u16>,
    /// Raw top-limit sample (true = reached)
    pub top_limit_raw: bool,
    /// Raw bottom-limit sample (true = reached)
    pub bottom_limit_raw: bool,
    /// Override slot snapshot
    pub overrides: OverrideCommand,
}

/// Commands emitted by one tick
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutput {
    /// Motor command, already masked by the limit interlock
    pub motor: MotorCommand,
    /// Safety light pattern for this tick
    pub light: LightPattern,
    /// Transition that happened this tick, if any
    pub event: Option<Event>,
}

/// The bridge control core
///
/// Conditioning filters, interlock and state machine in one place, free
/// of hardware. Every failure mode (missed echo, switch bounce, stale
/// data) degrades to "no motion" rather than an error value, so `tick`
/// is infallible.
pub struct BridgeController {
    config: BridgeConfig,
    state: DeckState,
    front: RangeHold,
    back: RangeHold,
    interlock: LimitInterlock,
    light: LightPattern,
    overrides: OverrideCommand,
}

impl BridgeController {
    /// Create a controller in the seated, idle posture
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            state: DeckState::Idle,
            front: RangeHold::new(),
            back: RangeHold::new(),
            interlock: LimitInterlock::new(config.debounce_ms),
            light: LightPattern::Off,
            overrides: OverrideCommand::released(),
        }
    }

    /// Current deck state
    pub fn state(&self) -> DeckState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run one control tick
    pub fn tick(&mut self, inputs: TickInputs) -> TickOutput {
        let front_cm = self.front.update(inputs.front_cm);
        let back_cm = self.back.update(inputs.back_cm);
        self.interlock
            .update(inputs.top_limit_raw, inputs.bottom_limit_raw, inputs.now_ms);
        self.overrides = inputs.overrides;

        let ctx = StepContext {
            now_ms: inputs.now_ms,
            front_cm,
            back_cm,
            top_limit: self.interlock.top_reached(),
            bottom_limit: self.interlock.bottom_reached(),
            overrides: inputs.overrides,
        };

        let result = self.state.step(&ctx, &self.config);
        self.state = result.next;
        self.light = result.light;

        TickOutput {
            motor: self.interlock.gate(result.motor),
            light: result.light,
            event: result.event,
        }
    }

    /// Snapshot for the operator console
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state,
            overridden: self.overrides.engaged,
            action: self.overrides.action,
            front_cm: self.front.value(),
            back_cm: self.back.value(),
            top_limit: self.interlock.top_reached(),
            bottom_limit: self.interlock.bottom_reached(),
            light: self.light,
        }
    }
}
