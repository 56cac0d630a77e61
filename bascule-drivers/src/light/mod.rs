//! Safety light drive
//!
//! The approach light warns river traffic and road traffic whenever the
//! bridge is doing anything. This module renders the controller's light
//! pattern onto the beacon pin.

pub mod beacon;

pub use beacon::Beacon;
