//! Host-side XRGB8888 canvas and test images

use mpro_driver::{DamageRect, SourceError, SourceFrame};
use thiserror::Error;

/// SMPTE-style colour bars, left to right
pub const BARS: [u32; 8] = [
    0x00FF_FFFF, // white
    0x00FF_FF00, // yellow
    0x0000_FFFF, // cyan
    0x0000_FF00, // green
    0x00FF_00FF, // magenta
    0x00FF_0000, // red
    0x0000_00FF, // blue
    0x0000_0000, // black
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("colour must be 6 hex digits (RRGGBB), got {0:?}")]
    Format(String),
}

/// Parse `RRGGBB` or `#RRGGBB` into an XRGB8888 pixel
pub fn parse_color(text: &str) -> Result<u32, ColorError> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::Format(text.to_string()));
    }
    u32::from_str_radix(hex, 16).map_err(|_| ColorError::Format(text.to_string()))
}

/// Tightly packed 32-bit image the size of the panel
pub struct Canvas {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Black canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    pub fn bounds(&self) -> DamageRect {
        DamageRect::covering(self.width, self.height)
    }

    pub fn fill(&mut self, color: u32) {
        self.fill_rect(self.bounds(), color);
    }

    /// Fill `rect`, clipped to the canvas
    pub fn fill_rect(&mut self, rect: DamageRect, color: u32) {
        let Some(rect) = rect.intersect(&self.bounds()) else {
            return;
        };
        let px = color.to_le_bytes();
        for y in rect.y1..rect.y2 {
            let start = ((y * self.width + rect.x1) * 4) as usize;
            let end = start + rect.width() as usize * 4;
            for chunk in self.data[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    /// Vertical colour bars across the full width
    pub fn color_bars(&mut self) {
        let count = BARS.len() as u32;
        for (i, color) in BARS.iter().enumerate() {
            let i = i as u32;
            let x1 = self.width * i / count;
            let x2 = self.width * (i + 1) / count;
            self.fill_rect(DamageRect::new(x1, 0, x2, self.height), *color);
        }
    }

    pub fn source(&self) -> Result<SourceFrame<'_>, SourceError> {
        SourceFrame::packed(&self.data, self.width, self.height)
    }
}
