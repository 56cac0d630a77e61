//! Console link receive task
//!
//! Receives frames from the operator console, applies override commands
//! to the shared override slot, and forwards status requests.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use bascule_core::command::{ManualAction, OverrideCommand};
use bascule_protocol::{ConsoleCommand, FrameParser};

use crate::channels::{OVERRIDE, STATUS_REQUEST};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Remote RX task - receives and parses console frames
#[embassy_executor::task]
pub async fn remote_rx_task(mut rx: BufferedUartRx) {
    info!("Remote RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match ConsoleCommand::from_frame(&frame) {
                            Ok(cmd) => handle_console_command(cmd),
                            Err(e) => {
                                warn!("Bad console command: {:?}", e);
                            }
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Apply a parsed console command
fn handle_console_command(cmd: ConsoleCommand) {
    match cmd {
        ConsoleCommand::Open => engage(ManualAction::Open),
        ConsoleCommand::Close => engage(ManualAction::Close),
        ConsoleCommand::Stop => engage(ManualAction::Stop),
        ConsoleCommand::Standby => engage(ManualAction::Standby),
        ConsoleCommand::Resume => {
            info!("Override released");
            OVERRIDE.lock(|slot| slot.set(OverrideCommand::released()));
        }
        ConsoleCommand::StatusRequest => {
            trace!("Status requested");
            STATUS_REQUEST.signal(());
        }
    }
}

fn engage(action: ManualAction) {
    info!("Override engaged: {:?}", action);
    OVERRIDE.lock(|slot| slot.set(OverrideCommand::manual(action)));
}
