//! Identification queries
//!
//! A query cycle is three control transfers:
//! 1. OUT [`QUERY`](crate::request::QUERY) with a 5-byte token
//! 2. IN [`REPLY_LEN`](crate::request::REPLY_LEN), exactly one byte holding
//!    the value length (4 or 8, the same count the token carries at offset 2)
//! 3. IN [`REPLY`](crate::request::REPLY), 5 bytes (screen, version) or 9 bytes (id)
//!
//! The reply starts with one status byte; the value follows at offset 1.

use core::fmt;

/// Length of every query token
pub const TOKEN_LEN: usize = 5;

/// Length of the reply-length read
pub const ACK_LEN: usize = 1;

/// Longest reply body (device id query)
pub const MAX_REPLY_SIZE: usize = 9;

/// Offset of the value inside a reply body
const VALUE_OFFSET: usize = 1;

const TOKEN_SCREEN: [u8; TOKEN_LEN] = [0x51, 0x02, 0x04, 0x1F, 0xFC];
const TOKEN_VERSION: [u8; TOKEN_LEN] = [0x51, 0x02, 0x04, 0x1F, 0xF8];
const TOKEN_DEVICE_ID: [u8; TOKEN_LEN] = [0x51, 0x02, 0x08, 0x1F, 0xF0];

/// Identification queries understood by the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Query {
    /// Panel type code
    Screen,
    /// Firmware version code
    Version,
    /// 8-byte device tag
    DeviceId,
}

impl Query {
    /// All queries, in the order they must be issued at attach time
    ///
    /// The version has to be known before the screen code can be mapped to
    /// a geometry, and the id is informational, so it goes last.
    pub const ATTACH_ORDER: [Query; 3] = [Query::Screen, Query::Version, Query::DeviceId];

    /// Token sent with the query request
    pub const fn token(self) -> &'static [u8; TOKEN_LEN] {
        match self {
            Query::Screen => &TOKEN_SCREEN,
            Query::Version => &TOKEN_VERSION,
            Query::DeviceId => &TOKEN_DEVICE_ID,
        }
    }

    /// Number of reply bytes to read, status byte included
    pub const fn reply_len(self) -> usize {
        match self {
            Query::Screen | Query::Version => VALUE_OFFSET + 4,
            Query::DeviceId => VALUE_OFFSET + 8,
        }
    }

    /// Value length the device acknowledges before the reply
    pub const fn ack(self) -> u8 {
        (self.reply_len() - VALUE_OFFSET) as u8
    }

    /// Check the byte returned by the reply-length read
    pub fn check_ack(self, ack: u8) -> Result<(), ReplyError> {
        let expected = self.ack();
        if ack != expected {
            return Err(ReplyError::AckMismatch {
                expected,
                actual: ack,
            });
        }
        Ok(())
    }

    /// Decode a reply body for this query
    pub fn parse_reply(self, reply: &[u8]) -> Result<QueryReply, ReplyError> {
        let expected = self.reply_len();
        if reply.len() < expected {
            return Err(ReplyError::Truncated {
                expected,
                actual: reply.len(),
            });
        }

        let value = &reply[VALUE_OFFSET..expected];
        Ok(match self {
            Query::Screen => QueryReply::Screen(le_u32(value)),
            Query::Version => QueryReply::Version(le_u32(value)),
            Query::DeviceId => {
                let mut id = [0u8; 8];
                id.copy_from_slice(value);
                QueryReply::DeviceId(id)
            }
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Screen => write!(f, "screen"),
            Query::Version => write!(f, "version"),
            Query::DeviceId => write!(f, "device id"),
        }
    }
}

/// Decoded reply to a [`Query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueryReply {
    /// Raw screen code
    Screen(u32),
    /// Raw firmware version code
    Version(u32),
    /// Opaque device tag
    DeviceId([u8; 8]),
}

impl QueryReply {
    /// Query this reply answers
    pub const fn query(&self) -> Query {
        match self {
            QueryReply::Screen(_) => Query::Screen,
            QueryReply::Version(_) => Query::Version,
            QueryReply::DeviceId(_) => Query::DeviceId,
        }
    }

    /// Encode this reply the way the device sends it (for testing or simulation)
    ///
    /// Returns the number of bytes written. The status byte is set to the
    /// query's [`ack`](Query::ack).
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, ReplyError> {
        let len = self.query().reply_len();
        if buffer.len() < len {
            return Err(ReplyError::Truncated {
                expected: len,
                actual: buffer.len(),
            });
        }

        buffer[0] = self.query().ack();
        match self {
            QueryReply::Screen(v) | QueryReply::Version(v) => {
                buffer[VALUE_OFFSET..len].copy_from_slice(&v.to_le_bytes());
            }
            QueryReply::DeviceId(id) => buffer[VALUE_OFFSET..len].copy_from_slice(id),
        }
        Ok(len)
    }
}

/// Errors while decoding a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReplyError {
    /// Fewer bytes than the query's reply length
    Truncated { expected: usize, actual: usize },
    /// Reply-length byte is not the query's value length
    AckMismatch { expected: u8, actual: u8 },
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { expected, actual } => {
                write!(f, "reply truncated: {} of {} bytes", actual, expected)
            }
            Self::AckMismatch { expected, actual } => {
                write!(f, "reply length {:#04x}, expected {:#04x}", actual, expected)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReplyError {}

fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        assert_eq!(Query::Screen.token(), &[0x51, 0x02, 0x04, 0x1F, 0xFC]);
        assert_eq!(Query::Version.token(), &[0x51, 0x02, 0x04, 0x1F, 0xF8]);
        assert_eq!(Query::DeviceId.token(), &[0x51, 0x02, 0x08, 0x1F, 0xF0]);
    }

    #[test]
    fn test_attach_order() {
        assert_eq!(
            Query::ATTACH_ORDER,
            [Query::Screen, Query::Version, Query::DeviceId]
        );
    }

    #[test]
    fn test_reply_lengths() {
        assert_eq!(Query::Screen.reply_len(), 5);
        assert_eq!(Query::Version.reply_len(), 5);
        assert_eq!(Query::DeviceId.reply_len(), 9);
        assert_eq!(Query::DeviceId.reply_len(), MAX_REPLY_SIZE);
    }

    #[test]
    fn test_ack_is_value_length() {
        for query in Query::ATTACH_ORDER {
            assert_eq!(query.ack(), query.token()[2]);
            assert_eq!(query.check_ack(query.ack()), Ok(()));
        }
        assert_eq!(Query::Screen.ack(), 4);
        assert_eq!(Query::DeviceId.ack(), 8);
    }

    #[test]
    fn test_ack_mismatch() {
        assert_eq!(
            Query::Screen.check_ack(0xEE),
            Err(ReplyError::AckMismatch {
                expected: 4,
                actual: 0xEE
            })
        );
        // Full reply length is not the ack
        assert!(Query::Version.check_ack(5).is_err());
        assert!(Query::DeviceId.check_ack(9).is_err());
    }

    #[test]
    fn test_parse_screen_little_endian() {
        let reply = [0x04, 0x05, 0x10, 0x00, 0x00];
        assert_eq!(
            Query::Screen.parse_reply(&reply),
            Ok(QueryReply::Screen(0x0000_1005))
        );
    }

    #[test]
    fn test_parse_version_ignores_status_byte() {
        let reply = [0xEE, 0x03, 0x00, 0x00, 0x00];
        assert_eq!(
            Query::Version.parse_reply(&reply),
            Ok(QueryReply::Version(3))
        );
    }

    #[test]
    fn test_parse_device_id() {
        let reply = [0x08, 1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(
            Query::DeviceId.parse_reply(&reply),
            Ok(QueryReply::DeviceId([1, 2, 3, 4, 5, 6, 7, 8]))
        );
    }

    #[test]
    fn test_parse_truncated() {
        let reply = [0x08, 1, 2, 3, 4];
        assert_eq!(
            Query::DeviceId.parse_reply(&reply),
            Err(ReplyError::Truncated {
                expected: 9,
                actual: 5
            })
        );
    }

    #[test]
    fn test_encode_matches_device_layout() {
        let mut buffer = [0u8; MAX_REPLY_SIZE];
        let len = QueryReply::Screen(0x0000_0b04).encode(&mut buffer).unwrap();
        assert_eq!(len, 5);
        assert_eq!(&buffer[..len], &[0x04, 0x04, 0x0b, 0x00, 0x00]);

        let parsed = Query::Screen.parse_reply(&buffer[..len]).unwrap();
        assert_eq!(parsed, QueryReply::Screen(0x0000_0b04));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buffer = [0u8; 4];
        assert!(QueryReply::Version(1).encode(&mut buffer).is_err());
    }
}
