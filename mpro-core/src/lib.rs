//! Board-agnostic core logic for VoCore screens
//!
//! This crate contains everything about driving the panel that does not
//! touch USB:
//!
//! - Panel catalog (screen code to geometry)
//! - Pixel format catalog and stride rules
//! - Damage rectangles
//! - XRGB8888 to RGB565 conversion
//! - The device-side frame buffer
//! - Configuration and capability types

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
pub mod convert;
pub mod format;
pub mod framebuffer;
pub mod mode;
pub mod panel;
pub mod rect;

// Re-export key types
pub use config::{Capabilities, CapabilityWarning, DriverConfig};
pub use convert::{SourceError, SourceFrame};
pub use format::{negotiate, FormatError, FormatInfo, PixelFormat};
pub use framebuffer::FrameBuffer;
pub use mode::ModeInfo;
pub use panel::{resolve, Model, PanelDescriptor};
pub use rect::DamageRect;
