//! Message types for the console link
//!
//! Message types are divided into two categories:
//! - Console → Bridge: manual override commands, status requests
//! - Bridge → Console: status reports

use crate::frame::{Frame, FrameError};

// Message type IDs: Console → Bridge
pub const MSG_COMMAND: u8 = 0x01;
pub const MSG_STATUS_REQUEST: u8 = 0x02;

// Message type IDs: Bridge → Console
pub const MSG_STATUS: u8 = 0x10;

// Action bytes carried in a MSG_COMMAND payload
const ACTION_OPEN: u8 = 0x01;
const ACTION_CLOSE: u8 = 0x02;
const ACTION_STOP: u8 = 0x03;
const ACTION_STANDBY: u8 = 0x04;
const ACTION_RESUME: u8 = 0x05;

/// Distance value reported when a sensor has no reading yet
pub const UNKNOWN_DISTANCE: u16 = 0xFFFF;

/// Commands parsed from console-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleCommand {
    /// Engage the override and drive the deck up
    Open,
    /// Engage the override and drive the deck down
    Close,
    /// Engage the override and stop the deck where it is
    Stop,
    /// Engage the override with the deck stopped and the light dark
    Standby,
    /// Release the override and return to automatic operation
    Resume,
    /// Ask the bridge for an immediate status report
    StatusRequest,
}

impl ConsoleCommand {
    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_COMMAND => {
                if frame.payload.is_empty() {
                    return Err(FrameError::InvalidFrame);
                }
                match frame.payload[0] {
                    ACTION_OPEN => Ok(ConsoleCommand::Open),
                    ACTION_CLOSE => Ok(ConsoleCommand::Close),
                    ACTION_STOP => Ok(ConsoleCommand::Stop),
                    ACTION_STANDBY => Ok(ConsoleCommand::Standby),
                    ACTION_RESUME => Ok(ConsoleCommand::Resume),
                    _ => Err(FrameError::InvalidFrame),
                }
            }
            MSG_STATUS_REQUEST => Ok(ConsoleCommand::StatusRequest),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this command into a frame (for testing or a console
    /// implementation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ConsoleCommand::Open => Frame::new(MSG_COMMAND, &[ACTION_OPEN]),
            ConsoleCommand::Close => Frame::new(MSG_COMMAND, &[ACTION_CLOSE]),
            ConsoleCommand::Stop => Frame::new(MSG_COMMAND, &[ACTION_STOP]),
            ConsoleCommand::Standby => Frame::new(MSG_COMMAND, &[ACTION_STANDBY]),
            ConsoleCommand::Resume => Frame::new(MSG_COMMAND, &[ACTION_RESUME]),
            ConsoleCommand::StatusRequest => Ok(Frame::empty(MSG_STATUS_REQUEST)),
        }
    }
}

/// Periodic status report from the bridge to the console
///
/// Payload layout: `[state][flags][front_hi][front_lo][back_hi][back_lo]`
/// with flags bit 0 = override engaged, bit 1 = top limit, bit 2 =
/// bottom limit, bit 3 = safety light on. Distances are centimeters in
/// big-endian, with [`UNKNOWN_DISTANCE`] standing in for a sensor that
/// has not produced a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    /// Wire code of the current controller state
    pub state_code: u8,
    /// Manual override engaged
    pub overridden: bool,
    /// Deck fully open (debounced top limit switch)
    pub top_limit: bool,
    /// Deck fully seated (debounced bottom limit switch)
    pub bottom_limit: bool,
    /// Safety light asserted (solid or blinking)
    pub light_on: bool,
    /// Last front channel distance, if any reading was ever valid
    pub front_cm: Option<u16>,
    /// Last back channel distance, if any reading was ever valid
    pub back_cm: Option<u16>,
}

const FLAG_OVERRIDE: u8 = 1 << 0;
const FLAG_TOP_LIMIT: u8 = 1 << 1;
const FLAG_BOTTOM_LIMIT: u8 = 1 << 2;
const FLAG_LIGHT: u8 = 1 << 3;

fn encode_distance(distance: Option<u16>) -> [u8; 2] {
    distance.unwrap_or(UNKNOWN_DISTANCE).to_be_bytes()
}

fn decode_distance(hi: u8, lo: u8) -> Option<u16> {
    match u16::from_be_bytes([hi, lo]) {
        UNKNOWN_DISTANCE => None,
        cm => Some(cm),
    }
}

impl StatusReport {
    /// Encode this report into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut flags = 0u8;
        if self.overridden {
            flags |= FLAG_OVERRIDE;
        }
        if self.top_limit {
            flags |= FLAG_TOP_LIMIT;
        }
        if self.bottom_limit {
            flags |= FLAG_BOTTOM_LIMIT;
        }
        if self.light_on {
            flags |= FLAG_LIGHT;
        }

        let front = encode_distance(self.front_cm);
        let back = encode_distance(self.back_cm);
        Frame::new(
            MSG_STATUS,
            &[
                self.state_code,
                flags,
                front[0],
                front[1],
                back[0],
                back[1],
            ],
        )
    }

    /// Parse a report from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        if frame.msg_type != MSG_STATUS || frame.payload.len() != 6 {
            return Err(FrameError::InvalidFrame);
        }

        let flags = frame.payload[1];
        Ok(Self {
            state_code: frame.payload[0],
            overridden: flags & FLAG_OVERRIDE != 0,
            top_limit: flags & FLAG_TOP_LIMIT != 0,
            bottom_limit: flags & FLAG_BOTTOM_LIMIT != 0,
            light_on: flags & FLAG_LIGHT != 0,
            front_cm: decode_distance(frame.payload[2], frame.payload[3]),
            back_cm: decode_distance(frame.payload[4], frame.payload[5]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_open() {
        let frame = ConsoleCommand::Open.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_COMMAND);
        assert_eq!(frame.payload[0], ACTION_OPEN);
    }

    #[test]
    fn test_command_status_request_is_empty() {
        let frame = ConsoleCommand::StatusRequest.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_STATUS_REQUEST);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_command_roundtrip_all() {
        let commands = [
            ConsoleCommand::Open,
            ConsoleCommand::Close,
            ConsoleCommand::Stop,
            ConsoleCommand::Standby,
            ConsoleCommand::Resume,
            ConsoleCommand::StatusRequest,
        ];
        for original in commands {
            let frame = original.to_frame().unwrap();
            let parsed = ConsoleCommand::from_frame(&frame).unwrap();
            assert_eq!(original, parsed);
        }
    }

    #[test]
    fn test_command_unknown_action_rejected() {
        let frame = Frame::new(MSG_COMMAND, &[0x7F]).unwrap();
        assert_eq!(
            ConsoleCommand::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_command_empty_payload_rejected() {
        let frame = Frame::empty(MSG_COMMAND);
        assert_eq!(
            ConsoleCommand::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_status_report_roundtrip() {
        let original = StatusReport {
            state_code: 3,
            overridden: false,
            top_limit: true,
            bottom_limit: false,
            light_on: true,
            front_cm: Some(55),
            back_cm: Some(412),
        };
        let frame = original.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_STATUS);
        assert_eq!(frame.payload.len(), 6);

        let parsed = StatusReport::from_frame(&frame).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_status_report_unknown_distances() {
        let original = StatusReport {
            state_code: 0,
            overridden: false,
            top_limit: false,
            bottom_limit: true,
            light_on: false,
            front_cm: None,
            back_cm: None,
        };
        let frame = original.to_frame().unwrap();
        assert_eq!(&frame.payload[2..6], &[0xFF, 0xFF, 0xFF, 0xFF]);

        let parsed = StatusReport::from_frame(&frame).unwrap();
        assert_eq!(parsed.front_cm, None);
        assert_eq!(parsed.back_cm, None);
    }

    #[test]
    fn test_status_report_flag_bits() {
        let report = StatusReport {
            state_code: 5,
            overridden: true,
            top_limit: false,
            bottom_limit: true,
            light_on: false,
            front_cm: Some(100),
            back_cm: None,
        };
        let frame = report.to_frame().unwrap();
        assert_eq!(frame.payload[1], FLAG_OVERRIDE | FLAG_BOTTOM_LIMIT);
    }

    #[test]
    fn test_status_report_short_payload_rejected() {
        let frame = Frame::new(MSG_STATUS, &[0, 0, 0]).unwrap();
        assert_eq!(
            StatusReport::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }
}
