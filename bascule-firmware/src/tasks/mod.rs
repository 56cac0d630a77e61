//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod beacon;
pub mod control;
pub mod motor;
pub mod range;
pub mod remote_rx;
pub mod remote_tx;

pub use beacon::beacon_task;
pub use control::control_task;
pub use motor::{motor_task, MotorFwConfig};
pub use range::range_task;
pub use remote_rx::remote_rx_task;
pub use remote_tx::remote_tx_task;
