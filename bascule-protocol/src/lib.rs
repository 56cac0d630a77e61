//! Operator Console Link Protocol
//!
//! This crate defines the UART-based protocol between the bridge
//! controller and the operator console. The console is a dumb peer: it
//! sends override commands and renders status reports, while every piece
//! of bridge logic stays on the controller.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–16B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Console → controller: manual override commands and status requests.
//! Controller → console: periodic and on-demand status reports.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{ConsoleCommand, StatusReport, UNKNOWN_DISTANCE};
