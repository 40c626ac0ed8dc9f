//! XRGB8888 to RGB565 conversion
//!
//! The host renders 32-bit pixels; the panel takes 16-bit RGB565. Each
//! damaged scanline is converted independently, optionally mirrored
//! horizontally. Rows are never reordered.

use core::fmt;

use crate::rect::DamageRect;

/// Source bytes per pixel
pub const SOURCE_BYTES_PER_PIXEL: usize = 4;

/// Destination bytes per pixel
pub const DEST_BYTES_PER_PIXEL: usize = 2;

/// Borrowed 32-bit XRGB8888 (or ARGB8888) image
///
/// Pixels are little-endian `u32`s laid out `pitch` bytes apart per row.
/// The alpha/padding byte is ignored.
#[derive(Debug, Clone, Copy)]
pub struct SourceFrame<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    pitch: u32,
}

impl<'a> SourceFrame<'a> {
    /// Wrap `data` as a `width` x `height` image with `pitch` bytes per row
    pub fn new(data: &'a [u8], width: u32, height: u32, pitch: u32) -> Result<Self, SourceError> {
        let row_bytes = width as usize * SOURCE_BYTES_PER_PIXEL;
        if (pitch as usize) < row_bytes {
            return Err(SourceError::PitchTooSmall);
        }

        let needed = match height {
            0 => 0,
            h => (h as usize - 1) * pitch as usize + row_bytes,
        };
        if data.len() < needed {
            return Err(SourceError::TooShort {
                needed,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            pitch,
        })
    }

    /// Wrap tightly packed rows (`pitch == width * 4`)
    pub fn packed(data: &'a [u8], width: u32, height: u32) -> Result<Self, SourceError> {
        Self::new(data, width, height, width * SOURCE_BYTES_PER_PIXEL as u32)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    /// The whole image as a rectangle
    pub fn bounds(&self) -> DamageRect {
        DamageRect::covering(self.width, self.height)
    }

    /// Pixel at (`x`, `y`), if inside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.pitch as usize + x as usize * SOURCE_BYTES_PER_PIXEL;
        let px = &self.data[offset..offset + SOURCE_BYTES_PER_PIXEL];
        Some(u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
    }

    /// Bytes of row `y` covering columns `x1..x2`
    fn row(&self, y: u32, x1: u32, x2: u32) -> &'a [u8] {
        let start = y as usize * self.pitch as usize + x1 as usize * SOURCE_BYTES_PER_PIXEL;
        let end = start + (x2 - x1) as usize * SOURCE_BYTES_PER_PIXEL;
        &self.data[start..end]
    }
}

/// Errors describing a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// Pitch shorter than one row of pixels
    PitchTooSmall,
    /// Buffer shorter than `pitch * height`
    TooShort { needed: usize, actual: usize },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PitchTooSmall => write!(f, "source pitch shorter than a row"),
            Self::TooShort { needed, actual } => {
                write!(f, "source buffer holds {} of {} bytes", actual, needed)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SourceError {}

/// Requantise one 32-bit pixel to RGB565
#[inline]
pub const fn xrgb8888_to_rgb565(pixel: u32) -> u16 {
    let r = (pixel >> 16) & 0xFF;
    let g = (pixel >> 8) & 0xFF;
    let b = pixel & 0xFF;
    (((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3)) as u16
}

/// Convert one scanline
///
/// `src` holds N source pixels, `dst` room for N destination pixels. With
/// `flip_x`, source pixel `i` lands at destination pixel `N - 1 - i`.
pub fn convert_line(src: &[u8], dst: &mut [u8], flip_x: bool) {
    let count = src.len() / SOURCE_BYTES_PER_PIXEL;
    debug_assert!(dst.len() >= count * DEST_BYTES_PER_PIXEL);

    for (i, px) in src.chunks_exact(SOURCE_BYTES_PER_PIXEL).enumerate() {
        let value = xrgb8888_to_rgb565(u32::from_le_bytes([px[0], px[1], px[2], px[3]]));
        let col = if flip_x { count - 1 - i } else { i };
        let out = col * DEST_BYTES_PER_PIXEL;
        dst[out..out + DEST_BYTES_PER_PIXEL].copy_from_slice(&value.to_le_bytes());
    }
}

/// Convert `rect` of `src` into `dst`, placing its top-left corner at `origin`
///
/// Only the destination bytes covered by the rectangle are written.
///
/// # Panics
///
/// If `rect` is not inside `src`, or the placed rectangle does not fit in
/// `dst` with `dst_pitch` bytes per row. Callers clip first.
pub fn convert_rect(
    src: &SourceFrame<'_>,
    rect: DamageRect,
    dst: &mut [u8],
    dst_pitch: usize,
    origin: (u32, u32),
    flip_x: bool,
) {
    if rect.is_empty() {
        return;
    }
    assert!(
        src.bounds().contains(&rect),
        "conversion rectangle outside source"
    );

    let line_bytes = rect.width() as usize * DEST_BYTES_PER_PIXEL;
    let (ox, oy) = (origin.0 as usize, origin.1 as usize);

    for (row, y) in (rect.y1..rect.y2).enumerate() {
        let start = (oy + row) * dst_pitch + ox * DEST_BYTES_PER_PIXEL;
        let line = &mut dst[start..start + line_bytes];
        convert_line(src.row(y, rect.x1, rect.x2), line, flip_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    /// Expand an RGB565 value back to 8-bit channels (low bits zero)
    fn rgb565_to_rgb888(value: u16) -> (u8, u8, u8) {
        let r = ((value >> 11) & 0x1F) as u8;
        let g = ((value >> 5) & 0x3F) as u8;
        let b = (value & 0x1F) as u8;
        (r << 3, g << 2, b << 3)
    }

    fn solid(width: u32, height: u32, pixel: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height) as usize * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&pixel.to_le_bytes());
        }
        data
    }

    fn read565(dst: &[u8], pitch: usize, x: usize, y: usize) -> u16 {
        let o = y * pitch + x * 2;
        u16::from_le_bytes([dst[o], dst[o + 1]])
    }

    #[test]
    fn test_primary_colours() {
        assert_eq!(xrgb8888_to_rgb565(0x00FF_0000), 0xF800);
        assert_eq!(xrgb8888_to_rgb565(0x0000_FF00), 0x07E0);
        assert_eq!(xrgb8888_to_rgb565(0x0000_00FF), 0x001F);
        assert_eq!(xrgb8888_to_rgb565(0x00FF_FFFF), 0xFFFF);
    }

    #[test]
    fn test_alpha_ignored() {
        assert_eq!(
            xrgb8888_to_rgb565(0xFF12_3456),
            xrgb8888_to_rgb565(0x0012_3456)
        );
    }

    #[test]
    fn test_source_validation() {
        let data = [0u8; 64];
        assert!(SourceFrame::new(&data, 4, 4, 16).is_ok());
        assert_eq!(
            SourceFrame::new(&data, 4, 4, 12).unwrap_err(),
            SourceError::PitchTooSmall
        );
        assert_eq!(
            SourceFrame::new(&data, 4, 5, 16).unwrap_err(),
            SourceError::TooShort {
                needed: 80,
                actual: 64
            }
        );
        // Last row need not be padded to the full pitch
        assert!(SourceFrame::new(&data[..60], 3, 4, 16).is_ok());
        assert_eq!(
            SourceFrame::new(&data[..59], 3, 4, 16).unwrap_err(),
            SourceError::TooShort {
                needed: 60,
                actual: 59
            }
        );
    }

    #[test]
    fn test_solid_rect_readback() {
        let data = solid(8, 4, 0x00C8_6432);
        let src = SourceFrame::packed(&data, 8, 4).unwrap();
        let pitch = 8 * 2;
        let mut dst = vec![0u8; pitch * 4];

        convert_rect(&src, src.bounds(), &mut dst, pitch, (0, 0), false);

        for y in 0..4 {
            for x in 0..8 {
                let (r, g, b) = rgb565_to_rgb888(read565(&dst, pitch, x, y));
                assert_eq!(r >> 3, 0xC8 >> 3);
                assert_eq!(g >> 2, 0x64 >> 2);
                assert_eq!(b >> 3, 0x32 >> 3);
            }
        }
    }

    #[test]
    fn test_only_damaged_bytes_touched() {
        let data = solid(6, 6, 0x00FF_FFFF);
        let src = SourceFrame::packed(&data, 6, 6).unwrap();
        let pitch = 12;
        let mut dst = vec![0u8; pitch * 6];

        let rect = DamageRect::new(2, 1, 4, 3);
        convert_rect(&src, rect, &mut dst, pitch, (2, 1), false);

        for y in 0..6 {
            for x in 0..6 {
                let inside = (2..4).contains(&x) && (1..3).contains(&y);
                let expected = if inside { 0xFFFF } else { 0 };
                assert_eq!(read565(&dst, pitch, x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_flip_mirrors_each_row() {
        // Row y holds pixels whose blue channel is 8 * (x + 1) + y
        let (w, h) = (5u32, 3u32);
        let mut data = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let px = 8 * (x + 1) + y * 64;
                data.extend_from_slice(&px.to_le_bytes());
            }
        }
        let src = SourceFrame::packed(&data, w, h).unwrap();
        let pitch = (w * 2) as usize;
        let mut plain = vec![0u8; pitch * h as usize];
        let mut flipped = vec![0u8; pitch * h as usize];

        convert_rect(&src, src.bounds(), &mut plain, pitch, (0, 0), false);
        convert_rect(&src, src.bounds(), &mut flipped, pitch, (0, 0), true);

        for y in 0..h as usize {
            for x in 0..w as usize {
                assert_eq!(
                    read565(&flipped, pitch, w as usize - 1 - x, y),
                    read565(&plain, pitch, x, y)
                );
            }
        }
        assert_ne!(plain, flipped);
    }

    #[test]
    fn test_flip_within_sub_rectangle() {
        let mut data = Vec::new();
        for x in 0..8u32 {
            data.extend_from_slice(&(x << 3).to_le_bytes());
        }
        let src = SourceFrame::packed(&data, 8, 1).unwrap();
        let mut dst = vec![0u8; 16];

        // Columns 2..5 mirrored in place: 2->4, 3->3, 4->2
        convert_rect(&src, DamageRect::new(2, 0, 5, 1), &mut dst, 16, (2, 0), true);

        assert_eq!(read565(&dst, 16, 2, 0), 4);
        assert_eq!(read565(&dst, 16, 3, 0), 3);
        assert_eq!(read565(&dst, 16, 4, 0), 2);
        assert_eq!(read565(&dst, 16, 1, 0), 0);
        assert_eq!(read565(&dst, 16, 5, 0), 0);
    }

    #[test]
    fn test_palindromic_row_flip_invariant() {
        let row = [0x10u32, 0x20, 0x30, 0x20, 0x10];
        let mut data = Vec::new();
        for px in row {
            data.extend_from_slice(&(px << 16).to_le_bytes());
        }
        let src = SourceFrame::packed(&data, 5, 1).unwrap();
        let mut plain = vec![0u8; 10];
        let mut flipped = vec![0u8; 10];

        convert_rect(&src, src.bounds(), &mut plain, 10, (0, 0), false);
        convert_rect(&src, src.bounds(), &mut flipped, 10, (0, 0), true);
        assert_eq!(plain, flipped);
    }

    #[test]
    fn test_padded_source_pitch() {
        // 2x2 image with 4 bytes of padding per row
        let mut data = Vec::new();
        data.extend_from_slice(&0x00FF_0000u32.to_le_bytes());
        data.extend_from_slice(&0x0000_FF00u32.to_le_bytes());
        data.extend_from_slice(&[0xAA; 4]);
        data.extend_from_slice(&0x0000_00FFu32.to_le_bytes());
        data.extend_from_slice(&0x00FF_FFFFu32.to_le_bytes());
        let src = SourceFrame::new(&data, 2, 2, 12).unwrap();
        let mut dst = vec![0u8; 8];

        convert_rect(&src, src.bounds(), &mut dst, 4, (0, 0), false);
        assert_eq!(read565(&dst, 4, 0, 0), 0xF800);
        assert_eq!(read565(&dst, 4, 1, 0), 0x07E0);
        assert_eq!(read565(&dst, 4, 0, 1), 0x001F);
        assert_eq!(read565(&dst, 4, 1, 1), 0xFFFF);
    }

    #[test]
    #[should_panic]
    fn test_rect_outside_source_panics() {
        let data = solid(2, 2, 0);
        let src = SourceFrame::packed(&data, 2, 2).unwrap();
        let mut dst = vec![0u8; 64];
        convert_rect(&src, DamageRect::new(0, 0, 3, 2), &mut dst, 16, (0, 0), false);
    }

    proptest! {
        #[test]
        fn prop_quantisation_within_one_lsb(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let pixel = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
            let (r2, g2, b2) = rgb565_to_rgb888(xrgb8888_to_rgb565(pixel));
            prop_assert!(r - r2 < 8);
            prop_assert!(g - g2 < 4);
            prop_assert!(b - b2 < 8);
        }

        #[test]
        fn prop_flip_maps_column(width in 1usize..64, col in 0usize..64) {
            let col = col % width;
            let mut src = vec![0u8; width * 4];
            src[col * 4..col * 4 + 4].copy_from_slice(&0x00FF_FFFFu32.to_le_bytes());
            let mut dst = vec![0u8; width * 2];

            convert_line(&src, &mut dst, true);

            let target = width - 1 - col;
            for x in 0..width {
                let v = u16::from_le_bytes([dst[x * 2], dst[x * 2 + 1]]);
                prop_assert_eq!(v, if x == target { 0xFFFF } else { 0 });
            }
        }
    }
}
