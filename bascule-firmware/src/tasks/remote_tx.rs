//! Console link transmit task
//!
//! Sends a status report to the operator console once a second, plus an
//! immediate report whenever the console asks for one.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use bascule_core::status::StatusSnapshot;
use bascule_protocol::StatusReport;

use crate::channels::{STATUS, STATUS_REQUEST};

/// Unsolicited report period
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Remote TX task - sends status frames to the console
#[embassy_executor::task]
pub async fn remote_tx_task(mut tx: BufferedUartTx) {
    info!("Remote TX task started");

    let mut ticker = Ticker::every(REPORT_INTERVAL);
    let mut latest: Option<StatusSnapshot> = None;

    loop {
        match select(ticker.next(), STATUS_REQUEST.wait()).await {
            Either::First(_) => {}
            Either::Second(_) => {
                trace!("Immediate status report");
            }
        }

        // Drain the freshest snapshot; fall back to the last one sent
        if let Some(snapshot) = STATUS.try_take() {
            latest = Some(snapshot);
        }
        if let Some(snapshot) = latest {
            send_report(&mut tx, &snapshot).await;
        }
    }
}

/// Encode and send one status report
async fn send_report(tx: &mut BufferedUartTx, snapshot: &StatusSnapshot) {
    let report = StatusReport {
        state_code: snapshot.state.code(),
        overridden: snapshot.overridden,
        top_limit: snapshot.top_limit,
        bottom_limit: snapshot.bottom_limit,
        light_on: snapshot.light.is_asserted(),
        front_cm: snapshot.front_cm,
        back_cm: snapshot.back_cm,
    };

    match report.to_frame() {
        Ok(frame) => {
            let mut buf = [0u8; 32];
            if let Ok(len) = frame.encode(&mut buf) {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("Failed to send status: {:?}", e);
                }
            }
        }
        Err(e) => {
            warn!("Status encode error: {:?}", e);
        }
    }
}
