//! Bridge control task
//!
//! Runs the fixed-rate control loop: snapshots the inputs, advances the
//! deck state machine, and publishes the resulting motor, light and
//! status values for the output tasks.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use bascule_core::command::{LightPattern, MotorCommand};
use bascule_core::config::BridgeConfig;
use bascule_core::control::{BridgeController, TickInputs};

use crate::channels::{BACK_RANGE, FRONT_RANGE, LIGHT_CMD, MOTOR_CMD, OVERRIDE, STATUS};

/// Control task - the periodic bridge control loop
///
/// Limit switches are wired closed-to-ground, so a low level means the
/// deck has reached that end of travel.
#[embassy_executor::task]
pub async fn control_task(
    top_limit: Input<'static>,
    bottom_limit: Input<'static>,
    config: BridgeConfig,
) {
    info!("Control task started");

    let tick_ms = config.tick_interval_ms;
    let mut controller = BridgeController::new(config);

    let mut ticker = Ticker::every(Duration::from_millis(tick_ms as u64));
    let start = Instant::now();

    let mut last_motor: Option<MotorCommand> = None;
    let mut last_light: Option<LightPattern> = None;

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis() as u32;

        // Exactly one override read per tick
        let overrides = OVERRIDE.lock(|slot| slot.get());

        let out = controller.tick(TickInputs {
            now_ms,
            front_cm: FRONT_RANGE.try_take().flatten(),
            back_cm: BACK_RANGE.try_take().flatten(),
            top_limit_raw: top_limit.is_low(),
            bottom_limit_raw: bottom_limit.is_low(),
            overrides,
        });

        if let Some(event) = out.event {
            info!("Bridge event: {:?}", event);
        }

        if last_motor != Some(out.motor) {
            debug!("Motor: {:?}", out.motor);
            MOTOR_CMD.signal(out.motor);
            last_motor = Some(out.motor);
        }

        if last_light != Some(out.light) {
            debug!("Light: {:?}", out.light);
            LIGHT_CMD.signal(out.light);
            last_light = Some(out.light);
        }

        STATUS.signal(controller.status());
    }
}
