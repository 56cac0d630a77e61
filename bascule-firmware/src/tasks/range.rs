//! Channel range measurement task
//!
//! Pings the two HC-SR04 sensors in alternation and publishes each
//! sounding. Alternating with a settle gap keeps one sensor's echo from
//! triggering the other across the channel.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Timer};
use hcsr04_async::{Config, DistanceUnit, Hcsr04, TemperatureUnit};

use crate::channels::{BACK_RANGE, FRONT_RANGE};

/// Settle time between opposite-side pings
const PING_GAP: Duration = Duration::from_millis(35);

/// Assumed ambient temperature for sound speed calculation
const TEMPERATURE_C: f64 = 20.0;

/// Soundings outside this window are treated as missed echoes (cm)
const MIN_RANGE_CM: f64 = 2.0;
const MAX_RANGE_CM: f64 = 400.0;

type RangeSensor = Hcsr04<Output<'static>, Input<'static>>;

/// Range task - alternating front/back ultrasonic soundings
#[embassy_executor::task]
pub async fn range_task(
    front_trigger: Output<'static>,
    front_echo: Input<'static>,
    back_trigger: Output<'static>,
    back_echo: Input<'static>,
) {
    info!("Range task started");

    let config = Config {
        distance_unit: DistanceUnit::Centimeters,
        temperature_unit: TemperatureUnit::Celsius,
    };
    let mut front = Hcsr04::new(front_trigger, front_echo, config);
    let mut back = Hcsr04::new(back_trigger, back_echo, config);

    loop {
        let front_cm = sound(&mut front).await;
        FRONT_RANGE.signal(front_cm);
        Timer::after(PING_GAP).await;

        let back_cm = sound(&mut back).await;
        BACK_RANGE.signal(back_cm);
        Timer::after(PING_GAP).await;

        trace!("Range: front={:?} back={:?}", front_cm, back_cm);
    }
}

/// Take one sounding, rejecting out-of-window and failed echoes
async fn sound(sensor: &mut RangeSensor) -> Option<u16> {
    match sensor.measure(TEMPERATURE_C).await {
        Ok(cm) if (MIN_RANGE_CM..=MAX_RANGE_CM).contains(&cm) => Some(cm as u16),
        Ok(_) => None,
        Err(_) => None,
    }
}
