//! Draw command headers
//!
//! A draw is a control write of a short header on request
//! [`DRAW`](crate::request::DRAW), followed by the frame buffer on the bulk
//! endpoint.
//!
//! Full frame (6 bytes):
//! ```text
//! ┌────┬────┬──────────────────┬────┐
//! │ 00 │ 2C │ block size (24b) │ 00 │
//! └────┴────┴──────────────────┴────┘
//! ```
//!
//! Partial frame (12 bytes):
//! ```text
//! ┌────┬────┬──────────────────┬────┬─────────┬─────────┬─────────┐
//! │ 00 │ 2C │ length (24b)     │ 00 │ x (16b) │ y (16b) │ w (16b) │
//! └────┴────┴──────────────────┴────┴─────────┴─────────┴─────────┘
//! ```
//!
//! The partial height is implicit: the device derives it from the length
//! and width.

use core::fmt;
use heapless::Vec;

/// Command opcode
pub const OPCODE: u8 = 0x00;

/// "Draw" sub-opcode
pub const SUBCODE_DRAW: u8 = 0x2C;

/// Full frame header length
pub const FULL_COMMAND_LEN: usize = 6;

/// Partial frame header length
pub const PARTIAL_COMMAND_LEN: usize = 12;

/// Longest header
pub const MAX_COMMAND_SIZE: usize = PARTIAL_COMMAND_LEN;

/// Reusable storage for one encoded header
pub type CommandBuffer = Vec<u8, MAX_COMMAND_SIZE>;

/// Largest value the 24-bit length field can carry
pub const MAX_LENGTH: u32 = 0x00FF_FFFF;

/// Bytes per pixel on the wire (RGB565)
pub const BYTES_PER_PIXEL: u32 = 2;

/// Errors while encoding or decoding a draw header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Output buffer shorter than the header
    BufferTooSmall,
    /// Header does not start with 00 2C
    InvalidOpcode,
    /// Header is neither 6 nor 12 bytes long
    InvalidLength,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small for draw command"),
            Self::InvalidOpcode => write!(f, "not a draw command"),
            Self::InvalidLength => write!(f, "invalid draw command length"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

/// Draw command header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawCommand {
    /// Redraw the whole panel from the frame buffer
    Full {
        /// Full device buffer size, margin included
        block_size: u32,
    },
    /// Redraw one rectangle
    Partial {
        /// Payload length declared to the device
        length: u32,
        /// Left edge
        x: u16,
        /// Top edge
        y: u16,
        /// Rectangle width
        width: u16,
    },
}

impl DrawCommand {
    /// Full frame header for a buffer of `block_size` bytes
    pub const fn full(block_size: u32) -> Self {
        DrawCommand::Full { block_size }
    }

    /// Partial header for the `width` x `height` rectangle at (`x`, `y`)
    pub const fn partial(x: u16, y: u16, width: u16, height: u16) -> Self {
        DrawCommand::Partial {
            length: (width as u32)
                .wrapping_mul(height as u32)
                .wrapping_mul(BYTES_PER_PIXEL),
            x,
            y,
            width,
        }
    }

    /// Encoded header length
    pub const fn len(&self) -> usize {
        match self {
            DrawCommand::Full { .. } => FULL_COMMAND_LEN,
            DrawCommand::Partial { .. } => PARTIAL_COMMAND_LEN,
        }
    }

    /// Always false; a header is never empty
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Value carried in the 24-bit length field
    pub const fn declared_length(&self) -> u32 {
        match self {
            DrawCommand::Full { block_size } => *block_size & MAX_LENGTH,
            DrawCommand::Partial { length, .. } => *length & MAX_LENGTH,
        }
    }

    /// Encode this header into a byte buffer
    ///
    /// Returns the number of bytes written. Lengths wider than 24 bits are
    /// truncated, as the field is.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, CommandError> {
        if buffer.len() < self.len() {
            return Err(CommandError::BufferTooSmall);
        }
        Ok(self.write(buffer))
    }

    /// Encode into `buffer`, replacing its contents
    pub fn encode_into(&self, buffer: &mut CommandBuffer) {
        let mut bytes = [0u8; MAX_COMMAND_SIZE];
        let len = self.write(&mut bytes);
        buffer.clear();
        // len <= MAX_COMMAND_SIZE, the buffer's capacity
        buffer.extend(bytes[..len].iter().copied());
    }

    fn write(&self, buffer: &mut [u8]) -> usize {
        let len = self.len();
        let length = self.declared_length().to_le_bytes();
        buffer[0] = OPCODE;
        buffer[1] = SUBCODE_DRAW;
        buffer[2..5].copy_from_slice(&length[..3]);
        buffer[5] = 0x00;

        if let DrawCommand::Partial { x, y, width, .. } = self {
            buffer[6..8].copy_from_slice(&x.to_le_bytes());
            buffer[8..10].copy_from_slice(&y.to_le_bytes());
            buffer[10..12].copy_from_slice(&width.to_le_bytes());
        }

        len
    }

    /// Decode a header (for testing or simulation)
    pub fn parse(bytes: &[u8]) -> Result<Self, CommandError> {
        if bytes.len() != FULL_COMMAND_LEN && bytes.len() != PARTIAL_COMMAND_LEN {
            return Err(CommandError::InvalidLength);
        }
        if bytes[0] != OPCODE || bytes[1] != SUBCODE_DRAW {
            return Err(CommandError::InvalidOpcode);
        }

        let length = u32::from_le_bytes([bytes[2], bytes[3], bytes[4], 0]);
        if bytes.len() == FULL_COMMAND_LEN {
            return Ok(DrawCommand::Full { block_size: length });
        }

        Ok(DrawCommand::Partial {
            length,
            x: u16::from_le_bytes([bytes[6], bytes[7]]),
            y: u16::from_le_bytes([bytes[8], bytes[9]]),
            width: u16::from_le_bytes([bytes[10], bytes[11]]),
        })
    }
}
