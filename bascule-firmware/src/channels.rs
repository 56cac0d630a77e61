//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use bascule_core::command::{LightPattern, MotorCommand, OverrideCommand};
use bascule_core::status::StatusSnapshot;

/// Latest front channel sounding (None = no echo)
pub static FRONT_RANGE: Signal<CriticalSectionRawMutex, Option<u16>> = Signal::new();

/// Latest back channel sounding (None = no echo)
pub static BACK_RANGE: Signal<CriticalSectionRawMutex, Option<u16>> = Signal::new();

/// Motor command signal (updated by the control task)
pub static MOTOR_CMD: Signal<CriticalSectionRawMutex, MotorCommand> = Signal::new();

/// Safety light pattern signal (updated by the control task)
pub static LIGHT_CMD: Signal<CriticalSectionRawMutex, LightPattern> = Signal::new();

/// Latest status snapshot for the console (updated every tick)
pub static STATUS: Signal<CriticalSectionRawMutex, StatusSnapshot> = Signal::new();

/// Signal that the console asked for an immediate status report
pub static STATUS_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Manual override slot
///
/// Written by the console RX task whenever an override command arrives,
/// read exactly once per control tick. A `Cell` behind a blocking mutex
/// keeps each read and write atomic with respect to the other side.
pub static OVERRIDE: Mutex<CriticalSectionRawMutex, Cell<OverrideCommand>> =
    Mutex::new(Cell::new(OverrideCommand::released()));
