//! Pixel format catalog
//!
//! Two formats are declared; only RGB565 is ever sent to the panel. The
//! XRGB8888 entry describes what the host renders into and keeps the
//! catalog open for panels with a wider native format.

use core::fmt;

/// Build a little-endian fourcc code
pub const fn fourcc(a: u8, b: u8, c: u8, d: u8) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24)
}

/// 16-bit RGB 5:6:5
pub const FOURCC_RGB565: u32 = fourcc(b'R', b'G', b'1', b'6');

/// 32-bit xRGB 8:8:8:8
pub const FOURCC_XRGB8888: u32 = fourcc(b'X', b'R', b'2', b'4');

/// Position of one channel inside a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitfield {
    /// Bit offset from the least significant bit
    pub offset: u32,
    /// Channel width in bits
    pub length: u32,
}

impl Bitfield {
    const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    const fn end(&self) -> u32 {
        self.offset + self.length
    }
}

/// Static description of a pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatInfo {
    pub name: &'static str,
    pub bits_per_pixel: u32,
    pub red: Bitfield,
    pub green: Bitfield,
    pub blue: Bitfield,
    pub transp: Bitfield,
    pub fourcc: u32,
}

impl FormatInfo {
    /// Sum of the colour and alpha channel widths
    pub const fn channel_bits(&self) -> u32 {
        self.red.length + self.green.length + self.blue.length + self.transp.length
    }

    /// Channels fit in the pixel and the pixel is a whole number of bytes
    pub fn is_consistent(&self) -> bool {
        let fields = [self.red, self.green, self.blue, self.transp];
        self.bits_per_pixel > 0
            && self.bits_per_pixel % 8 == 0
            && self.channel_bits() <= self.bits_per_pixel
            && fields.iter().all(|f| f.end() <= self.bits_per_pixel)
    }
}

/// Format catalog, indexed by [`PixelFormat`]
pub static FORMATS: [FormatInfo; 2] = [
    FormatInfo {
        name: "r5g6b5",
        bits_per_pixel: 16,
        red: Bitfield::new(11, 5),
        green: Bitfield::new(5, 6),
        blue: Bitfield::new(0, 5),
        transp: Bitfield::new(0, 0),
        fourcc: FOURCC_RGB565,
    },
    FormatInfo {
        name: "x8r8g8b8",
        bits_per_pixel: 32,
        red: Bitfield::new(16, 8),
        green: Bitfield::new(8, 8),
        blue: Bitfield::new(0, 8),
        transp: Bitfield::new(0, 0),
        fourcc: FOURCC_XRGB8888,
    },
];

/// Formats in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 16-bit RGB 5:6:5, the panel's native format
    Rgb565,
    /// 32-bit xRGB 8:8:8:8
    Xrgb8888,
}

impl PixelFormat {
    /// Format used for the device buffer
    pub const SELECTED: PixelFormat = PixelFormat::Rgb565;

    /// Every catalogued format
    pub const ALL: [PixelFormat; 2] = [PixelFormat::Rgb565, PixelFormat::Xrgb8888];

    /// Catalog entry for this format
    pub fn info(self) -> &'static FormatInfo {
        match self {
            PixelFormat::Rgb565 => &FORMATS[0],
            PixelFormat::Xrgb8888 => &FORMATS[1],
        }
    }

    /// Look up a format by its catalog name
    pub fn from_name(name: &str) -> Option<PixelFormat> {
        Self::ALL.into_iter().find(|f| f.info().name == name)
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn bits_per_pixel(self) -> u32 {
        self.info().bits_per_pixel
    }

    /// Minimum bytes per scanline for `width` pixels
    pub fn min_pitch(self, width: u32) -> Result<u32, FormatError> {
        let pitch = self
            .bits_per_pixel()
            .checked_mul(width)
            .map(|bits| bits / 8)
            .ok_or(FormatError::ZeroStride)?;
        if pitch == 0 {
            return Err(FormatError::ZeroStride);
        }
        Ok(pitch)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.info().fourcc.to_le_bytes();
        write!(
            f,
            "{} ({}{}{}{})",
            self.name(),
            a as char,
            b as char,
            c as char,
            d as char
        )
    }
}

/// Resolve a requested format name against the catalog
pub fn negotiate(requested: &str) -> Result<PixelFormat, FormatError> {
    if requested.is_empty() {
        return Err(FormatError::Missing);
    }

    let format = PixelFormat::from_name(requested).ok_or(FormatError::Unknown)?;
    if !format.info().is_consistent() {
        return Err(FormatError::Inconsistent);
    }
    Ok(format)
}

/// Format resolution errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// No format name given
    Missing,
    /// Name not in the catalog
    Unknown,
    /// Catalog entry has impossible channel layout
    Inconsistent,
    /// Stride computed as zero (or overflowed)
    ZeroStride,
    /// Format cannot be used for the device buffer
    UnsupportedDestination,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing framebuffer format"),
            Self::Unknown => write!(f, "unknown framebuffer format"),
            Self::Inconsistent => write!(f, "inconsistent format description"),
            Self::ZeroStride => write!(f, "invalid stride"),
            Self::UnsupportedDestination => write!(f, "format not supported by the panel"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}
