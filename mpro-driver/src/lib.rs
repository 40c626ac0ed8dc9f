//! Host-side driver for VoCore MPRO USB screens
//!
//! Ties the transport, protocol and core crates together:
//!
//! ```text
//! attach ──► identify ──► resolve capabilities ──► negotiate format ──► Device
//!                                                                        │
//! update(src, damage) ──► convert into frame buffer ──► blit ◄───────────┘
//!                                                        │
//!                                   draw command (0xB0) + whole buffer (bulk)
//! ```
//!
//! The driver is generic over [`UsbTransport`], so it runs against real
//! hardware or an in-memory screen alike.

#![deny(unsafe_code)]

pub mod blit;
pub mod device;
pub mod error;
pub mod identify;
pub mod info;
mod transfer;

#[cfg(test)]
mod mock;

pub use device::Device;
pub use error::{AttachError, ConfigError, IoError, ProtocolError, Stage};
pub use identify::identify;
pub use info::DeviceInfo;

pub use mpro_core::{
    Capabilities, CapabilityWarning, DamageRect, DriverConfig, ModeInfo, PanelDescriptor,
    PixelFormat, SourceError, SourceFrame,
};
pub use mpro_hal::{TransportError, UsbTransport};
