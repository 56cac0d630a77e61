//! Frame encoding and decoding for the console link
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-16)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-16 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes
//!
//! Console link messages are tiny (largest payload is the status report),
//! so the payload bound is deliberately small.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 16;

/// Maximum complete frame size (START + LENGTH + TYPE + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Length byte or payload layout not valid for this link
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            msg_type,
            payload: payload_vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Checksum over everything after the start byte
    fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
        payload
            .iter()
            .fold(length ^ msg_type, |acc, byte| acc ^ byte)
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = 4 + self.payload.len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.msg_type;
        buffer[3..3 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[3 + self.payload.len()] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Incremental parser for incoming frames
///
/// Fed a byte at a time from the UART; hunts for the start byte, so it
/// resynchronizes after line noise or a partial frame. The checksum is
/// folded in as each byte arrives, and the payload countdown comes from
/// the length byte, so a completed frame needs no second pass. A 0xAA
/// landing inside a frame body is payload, not a new start.
#[derive(Debug, Clone)]
pub struct FrameParser {
    slot: Slot,
    msg_type: u8,
    /// Payload bytes still owed by the wire
    remaining: usize,
    /// XOR of length, type and payload seen so far
    running_xor: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// Which frame byte the parser expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Start,
    Length,
    Type,
    Body,
    Trailer,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            slot: Slot::Start,
            msg_type: 0,
            remaining: 0,
            running_xor: 0,
            payload: Vec::new(),
        }
    }

    /// Reset to hunting for a start byte
    pub fn reset(&mut self) {
        self.slot = Slot::Start;
        self.msg_type = 0;
        self.remaining = 0;
        self.running_xor = 0;
        self.payload.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a malformed
    /// frame (the parser has already reset itself and keeps hunting).
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.slot = match self.slot {
            Slot::Start if byte == FRAME_START => Slot::Length,
            // Anything else between frames is noise
            Slot::Start => Slot::Start,
            Slot::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.remaining = byte as usize;
                self.running_xor = byte;
                Slot::Type
            }
            Slot::Type => {
                self.msg_type = byte;
                self.running_xor ^= byte;
                if self.remaining == 0 {
                    Slot::Trailer
                } else {
                    Slot::Body
                }
            }
            Slot::Body => {
                // Cannot overflow: the length byte was bounds-checked
                let _ = self.payload.push(byte);
                self.running_xor ^= byte;
                self.remaining -= 1;
                if self.remaining == 0 {
                    Slot::Trailer
                } else {
                    Slot::Body
                }
            }
            Slot::Trailer => {
                let valid = byte == self.running_xor;
                let msg_type = self.msg_type;
                let payload = core::mem::take(&mut self.payload);
                self.reset();

                if !valid {
                    return Err(FrameError::InvalidChecksum);
                }
                return Ok(Some(Frame { msg_type, payload }));
            }
        };
        Ok(None)
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any. Bytes after that
    /// frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
