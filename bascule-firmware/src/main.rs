//! Bascule - Drawbridge Controller Firmware
//!
//! Main firmware binary for RP2040-based bascule bridge controllers.
//! Reads two channel-facing ultrasonic sensors and two travel limit
//! switches, runs the deck state machine at a fixed tick, and drives
//! the H-bridge deck motor and safety light. An operator console on
//! UART0 can take manual control and query status.
//!
//! Named after the bascule bridge - French "bascule" (seesaw), the
//! counterweighted deck design this controller raises and lowers for
//! boat traffic.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bascule_core::config::BridgeConfig;

use crate::tasks::MotorFwConfig;

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bascule firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = BridgeConfig::default();

    // Setup UART0 for the operator console link
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("Console UART initialized");

    // Travel limit switches: closed to ground at end of travel
    let top_limit = Input::new(p.PIN_2, Pull::Up);
    let bottom_limit = Input::new(p.PIN_3, Pull::Up);

    // H-bridge inputs on PWM slice 7: GPIO14 = raise (7A), GPIO15 = lower (7B)
    let motor_config = MotorFwConfig::default();
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = motor_config.pwm_top;
    let pwm = Pwm::new_output_ab(p.PWM_SLICE7, p.PIN_14, p.PIN_15, pwm_config);

    info!("H-bridge PWM initialized");

    // Safety light beacon
    let beacon_pin = Output::new(p.PIN_16, Level::Low);

    // Channel range sensors (HC-SR04): front guards the approach span,
    // back guards the far span
    let front_trigger = Output::new(p.PIN_10, Level::Low);
    let front_echo = Input::new(p.PIN_11, Pull::None);
    let back_trigger = Output::new(p.PIN_12, Level::Low);
    let back_echo = Input::new(p.PIN_13, Pull::None);

    info!("Range sensors initialized");

    // Spawn tasks
    spawner
        .spawn(tasks::control_task(top_limit, bottom_limit, config))
        .unwrap();
    spawner
        .spawn(tasks::range_task(
            front_trigger,
            front_echo,
            back_trigger,
            back_echo,
        ))
        .unwrap();
    spawner.spawn(tasks::motor_task(pwm, motor_config)).unwrap();
    spawner
        .spawn(tasks::beacon_task(beacon_pin, config.blink_half_period_ms))
        .unwrap();
    spawner.spawn(tasks::remote_rx_task(rx)).unwrap();
    spawner.spawn(tasks::remote_tx_task(tx)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
