//! Deck motor drive
//!
//! The deck is moved by a single DC motor behind an H-bridge. This module
//! turns the controller's motor commands into the bridge input pair and
//! enforces the off window between opposing drive directions.

pub mod deck;

pub use deck::{DeckMotor, DeckMotorConfig, DriveLevels, DrivePhase};
