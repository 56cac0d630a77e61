//! Operator-facing status snapshot

use crate::command::{LightPattern, ManualAction};
use crate::state::DeckState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point-in-time controller status
///
/// Everything the operator console shows: the deck state, the override
/// slot, the held distances and the debounced limits. Produced after
/// every tick; the firmware encodes it into the wire status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusSnapshot {
    /// Current deck state
    pub state: DeckState,
    /// True while the operator override is engaged
    pub overridden: bool,
    /// Last requested manual action
    pub action: ManualAction,
    /// Held front distance (None = never measured)
    pub front_cm: Option<u16>,
    /// Held back distance (None = never measured)
    pub back_cm: Option<u16>,
    /// Debounced top limit
    pub top_limit: bool,
    /// Debounced bottom limit
    pub bottom_limit: bool,
    /// Light pattern currently commanded
    pub light: LightPattern,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            state: DeckState::Idle,
            overridden: false,
            action: ManualAction::Stop,
            front_cm: None,
            back_cm: None,
            top_limit: false,
            bottom_limit: false,
            light: LightPattern::Off,
        }
    }
}
