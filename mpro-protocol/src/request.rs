//! Vendor request codes (`bRequest`)

/// Send a query token
pub const QUERY: u8 = 0xB5;

/// Read the one-byte reply length
pub const REPLY_LEN: u8 = 0xB6;

/// Read the reply body
pub const REPLY: u8 = 0xB7;

/// Send a draw command header
pub const DRAW: u8 = 0xB0;
