//! VoCore Screen vendor protocol
//!
//! This crate defines the binary command set spoken by the MPRO family of
//! USB screens. Everything travels as vendor control requests on the
//! default pipe, except the pixel payload which follows a draw command on
//! bulk endpoint 0x02.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌─────────────────┬──────┬─────────┬──────────────────────────────┐
//! │ Purpose         │ Dir  │ Request │ Payload                      │
//! ├─────────────────┼──────┼─────────┼──────────────────────────────┤
//! │ Query           │ OUT  │ 0xB5    │ 5-byte token                 │
//! │ Reply length    │ IN   │ 0xB6    │ 1 byte                       │
//! │ Reply           │ IN   │ 0xB7    │ 5 or 9 bytes (value at +1)   │
//! │ Draw            │ OUT  │ 0xB0    │ 6 (full) or 12 (partial)     │
//! │ Pixels          │ BULK │ -       │ whole frame buffer           │
//! └─────────────────┴──────┴─────────┴──────────────────────────────┘
//! ```
//!
//! Multi-byte fields are little-endian throughout.

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod draw;
pub mod query;
pub mod request;

pub use draw::{
    CommandBuffer, CommandError, DrawCommand, FULL_COMMAND_LEN, MAX_COMMAND_SIZE, PARTIAL_COMMAND_LEN,
};
pub use query::{Query, QueryReply, ReplyError, ACK_LEN, MAX_REPLY_SIZE, TOKEN_LEN};
