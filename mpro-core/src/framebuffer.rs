//! Device-side frame buffer
//!
//! One contiguous RGB565 image of the whole panel, followed by the panel's
//! trailing margin. This is exactly the byte block the bulk endpoint
//! expects, so it is sent as-is after every draw command.

use alloc::vec;
use alloc::vec::Vec;

use crate::convert::{self, SourceFrame};
use crate::format::{FormatError, PixelFormat};
use crate::panel::PanelDescriptor;
use crate::rect::DamageRect;

/// RGB565 frame buffer sized for one panel
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    stride: u32,
}

impl FrameBuffer {
    /// Allocate a zeroed buffer for `panel` in `format`
    ///
    /// Only RGB565 can be sent to the panel.
    pub fn new(panel: &PanelDescriptor, format: PixelFormat) -> Result<Self, FormatError> {
        if format != PixelFormat::Rgb565 {
            return Err(FormatError::UnsupportedDestination);
        }
        let stride = format.min_pitch(panel.width)?;

        Ok(Self {
            bytes: vec![0; panel.block_size() as usize],
            width: panel.width,
            height: panel.height,
            stride,
        })
    }

    /// Entire block, margin included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes per scanline
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Block length declared in full draw commands
    pub fn block_size(&self) -> u32 {
        self.bytes.len() as u32
    }

    /// Pixel area of the panel, end-exclusive
    pub fn area(&self) -> DamageRect {
        DamageRect::covering(self.width, self.height)
    }

    /// Zero every byte, margin included
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Convert `rect` of `src` into the same place in this buffer
    ///
    /// `rect` must already be clipped to both the source and the panel.
    pub fn convert(&mut self, src: &SourceFrame<'_>, rect: DamageRect, flip_x: bool) {
        debug_assert!(self.area().contains(&rect));
        convert::convert_rect(
            src,
            rect,
            &mut self.bytes,
            self.stride as usize,
            (rect.x1, rect.y1),
            flip_x,
        );
    }

    /// RGB565 value at (`x`, `y`)
    pub fn pixel(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.stride + x * 2) as usize;
        Some(u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]]))
    }
}
