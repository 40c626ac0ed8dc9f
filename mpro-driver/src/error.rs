//! Driver error types

use std::fmt;

use mpro_core::FormatError;
use mpro_hal::TransportError;
use mpro_protocol::{Query, ReplyError};
use thiserror::Error;

/// One USB transfer issued by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Query token write (0xB5)
    Query,
    /// Reply length read (0xB6)
    ReplyLength,
    /// Reply body read (0xB7)
    Reply,
    /// Draw command write (0xB0)
    DrawCommand,
    /// Frame buffer bulk write
    Payload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Query => write!(f, "query write"),
            Stage::ReplyLength => write!(f, "reply length read"),
            Stage::Reply => write!(f, "reply read"),
            Stage::DrawCommand => write!(f, "draw command write"),
            Stage::Payload => write!(f, "frame buffer write"),
        }
    }
}

/// A transfer failed or moved fewer bytes than requested
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IoError {
    #[error("{stage} failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: TransportError,
    },

    #[error("{stage} moved {actual} of {expected} bytes")]
    Short {
        stage: Stage,
        expected: usize,
        actual: usize,
    },
}

impl IoError {
    /// Transfer that failed
    pub fn stage(&self) -> Stage {
        match self {
            IoError::Transport { stage, .. } | IoError::Short { stage, .. } => *stage,
        }
    }

    /// Whether the transfer ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            IoError::Transport {
                source: TransportError::Timeout,
                ..
            }
        )
    }
}

/// Identification handshake failure
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("{query} query: {source}")]
    Io {
        query: Query,
        #[source]
        source: IoError,
    },

    #[error("{query} query: {source}")]
    Reply {
        query: Query,
        #[source]
        source: ReplyError,
    },
}

impl ProtocolError {
    /// Query whose cycle failed
    pub fn query(&self) -> Query {
        match self {
            ProtocolError::Io { query, .. } | ProtocolError::Reply { query, .. } => *query,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported preferred depth {0} bpp (expected 16 or 32)")]
    UnsupportedDepth(u32),

    #[error("pixel format: {0}")]
    Format(#[from] FormatError),
}

/// Device bring-up failure
///
/// No device is returned when attach fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    #[error("identification failed: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
}
