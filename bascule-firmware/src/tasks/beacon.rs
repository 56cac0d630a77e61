//! Safety light task
//!
//! Renders the commanded light pattern onto the beacon pin. Blink phase
//! comes from the uptime clock, so the flash cadence stays steady across
//! pattern changes.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Ticker};

use bascule_core::command::LightPattern;
use bascule_drivers::light::Beacon;

use crate::channels::LIGHT_CMD;

/// Render interval in ms; well under the blink half period
const RENDER_INTERVAL_MS: u64 = 50;

/// Beacon task - drives the safety light
#[embassy_executor::task]
pub async fn beacon_task(pin: Output<'static>, blink_half_period_ms: u32) {
    info!("Beacon task started");

    let mut beacon = Beacon::new_active_high(pin, blink_half_period_ms);
    let mut pattern = LightPattern::Off;

    let mut ticker = Ticker::every(Duration::from_millis(RENDER_INTERVAL_MS));
    let start = Instant::now();

    loop {
        if let Some(p) = LIGHT_CMD.try_take() {
            debug!("Light pattern: {:?}", p);
            pattern = p;
        }

        let now_ms = start.elapsed().as_millis() as u32;
        beacon.render(pattern, now_ms);

        ticker.next().await;
    }
}
