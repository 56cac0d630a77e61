//! Configuration type definitions
//!
//! Thresholds, dwell times and drive duties for the bridge controller.
//! Nothing is persisted: the firmware constructs its configuration at boot
//! and the controller rebuilds all runtime state from hardware.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance below which an approach sensor reports a boat (cm)
pub const DEFAULT_APPROACH_THRESHOLD_CM: u16 = 20;

/// Distance both approaches must exceed before the deck closes (cm)
pub const DEFAULT_CLEAR_THRESHOLD_CM: u16 = 40;

/// Debounce interval for the limit switches (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Dwell between first detection and the deck starting to rise (ms)
pub const DEFAULT_APPROACH_BUFFER_MS: u32 = 10_000;

/// Longest the deck holds open waiting for the channel to clear (ms)
pub const DEFAULT_MAX_WAIT_MS: u32 = 30_000;

/// Control tick cadence (ms)
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 50;

/// Safety beacon blink half-period (ms); full period is twice this
pub const DEFAULT_BLINK_HALF_PERIOD_MS: u32 = 500;

/// Bridge controller configuration
///
/// All durations are milliseconds against the same monotonic clock the
/// controller is ticked with; distances are centimeters; duties are percent
/// of full drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// A held reading below this counts as an approaching boat (cm)
    pub approach_threshold_cm: u16,
    /// Both held readings must exceed this for the channel to count as clear (cm)
    pub clear_threshold_cm: u16,
    /// Raw limit-switch levels must hold this long before they are trusted (ms)
    pub debounce_ms: u32,
    /// Wait between first detection and starting to raise the deck (ms)
    pub approach_buffer_ms: u32,
    /// Maximum open-hold before the deck closes regardless of readings (ms)
    pub max_wait_ms: u32,
    /// Control tick cadence (ms)
    pub tick_interval_ms: u32,
    /// Beacon blink half-period (ms)
    pub blink_half_period_ms: u32,
    /// Drive duty while raising the deck (percent, 0-100)
    pub raise_duty_pct: u8,
    /// Drive duty while lowering the deck (percent, 0-100)
    pub lower_duty_pct: u8,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            approach_threshold_cm: DEFAULT_APPROACH_THRESHOLD_CM,
            clear_threshold_cm: DEFAULT_CLEAR_THRESHOLD_CM,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            approach_buffer_ms: DEFAULT_APPROACH_BUFFER_MS,
            max_wait_ms: DEFAULT_MAX_WAIT_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            blink_half_period_ms: DEFAULT_BLINK_HALF_PERIOD_MS,
            raise_duty_pct: 100,
            lower_duty_pct: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_ordered() {
        let config = BridgeConfig::default();
        // A boat must be able to both trip the approach and clear the channel
        assert!(config.clear_threshold_cm > config.approach_threshold_cm);
    }

    #[test]
    fn test_default_duties_bounded() {
        let config = BridgeConfig::default();
        assert!(config.raise_duty_pct <= 100);
        assert!(config.lower_duty_pct <= 100);
    }

    #[test]
    fn test_buffer_longer_than_tick() {
        let config = BridgeConfig::default();
        assert!(config.approach_buffer_ms > config.tick_interval_ms);
        assert!(config.max_wait_ms >= config.approach_buffer_ms);
    }
}
