//! Deck motor control task
//!
//! Receives motor commands from the control task and drives the H-bridge
//! via the two PWM outputs. Uses the bascule_drivers DeckMotor driver for
//! level translation and reversal dead time.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Duration, Ticker};

use bascule_drivers::motor::{DeckMotor, DeckMotorConfig};

use crate::channels::MOTOR_CMD;

/// Motor update interval in ms
const UPDATE_INTERVAL_MS: u32 = 10;

/// Deck motor configuration for the firmware
pub struct MotorFwConfig {
    /// PWM top value (determines carrier frequency)
    pub pwm_top: u16,
    /// Dead time between opposing drive directions in ms
    pub reversal_dead_time_ms: u16,
}

impl Default for MotorFwConfig {
    fn default() -> Self {
        Self {
            pwm_top: 4999, // 125 MHz / 5000 = 25 kHz carrier
            reversal_dead_time_ms: 200,
        }
    }
}

/// Deck motor control task
///
/// PWM channel A feeds the raise side of the bridge, channel B the lower
/// side. The driver guarantees at most one of them is nonzero.
#[embassy_executor::task]
pub async fn motor_task(mut pwm: Pwm<'static>, config: MotorFwConfig) {
    info!("Motor task started");

    let mut motor = DeckMotor::new(DeckMotorConfig {
        reversal_dead_time_ms: config.reversal_dead_time_ms,
    });

    // Configure PWM with both sides off
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = config.pwm_top;
    pwm_config.compare_a = 0;
    pwm_config.compare_b = 0;
    pwm.set_config(&pwm_config);

    let mut ticker = Ticker::every(Duration::from_millis(UPDATE_INTERVAL_MS as u64));

    loop {
        // Check for a new motor command (non-blocking)
        if let Some(cmd) = MOTOR_CMD.try_take() {
            trace!("Motor command: {:?}", cmd);
            motor.command(cmd);
        }

        // Update the driver (handles dead time)
        let levels = motor.update(UPDATE_INTERVAL_MS);

        // Apply levels to the PWM pair
        pwm_config.compare_a = (levels.raise_pct as u32 * config.pwm_top as u32 / 100) as u16;
        pwm_config.compare_b = (levels.lower_pct as u32 * config.pwm_top as u32 / 100) as u16;
        pwm.set_config(&pwm_config);

        ticker.next().await;
    }
}
