//! Hardware-facing driver logic
//!
//! This crate sits between the control core and the pins. It provides:
//!
//! - Deck motor: translates motor commands into the H-bridge input pair,
//!   inserting a dead-time window on direction reversal
//! - Beacon: renders safety light patterns onto a GPIO pin
//!
//! Everything here is host-testable; the firmware crate owns the actual
//! peripherals and feeds these drivers from its periodic tasks.

#![no_std]
#![deny(unsafe_code)]

pub mod light;
pub mod motor;
