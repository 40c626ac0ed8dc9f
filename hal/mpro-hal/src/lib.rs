//! VoCore Screen transport abstraction layer
//!
//! This crate defines the transport traits that the screen driver is
//! written against. A backend (libusb via `mpro-hal-rusb`, or an in-memory
//! fake in tests) implements them, so the protocol and blit logic never
//! touch a USB stack directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (mpro-screen, etc.)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  mpro-driver (identify, blit)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  mpro-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ mpro-hal-rusb │       │  test fakes   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`usb::UsbTransport`] - vendor control transfers and bulk writes

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod usb;

// Re-export key items at crate root for convenience
pub use usb::{
    TransportError, UsbTransport, BULK_ENDPOINT, MAX_DELAY, REQUEST_TYPE_IN, REQUEST_TYPE_OUT,
};
