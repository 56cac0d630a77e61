//! Board-agnostic control logic for the Bascule drawbridge controller
//!
//! This crate contains all bridge logic that does not depend on specific
//! hardware implementations:
//!
//! - Deck state machine (automatic open/close cycle, manual override)
//! - Input conditioning (limit-switch debounce, range last-good hold)
//! - Limit-switch safety interlock
//! - Motor / safety-light command types
//! - Configuration type definitions
//! - Status snapshot for the operator console

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod control;
pub mod filter;
pub mod safety;
pub mod state;
pub mod status;
