//! Panel catalog
//!
//! Maps the screen code reported by the device to the panel's geometry.
//! Unknown codes fall back to a 480x800 panel of unknown physical size, so
//! resolution never fails.

use core::fmt;

use crate::rect::DamageRect;

/// Refresh rate of every panel in the family
pub const REFRESH_HZ: u32 = 60;

/// Highest screen code of the early panels that only take full frames
pub const FULL_FRAME_ONLY_MAX_SCREEN: u32 = 2;

/// Firmware version of the 5" panel that needs no trailing margin
const MPRO5_NO_MARGIN_VERSION: u32 = 0x0000_0003;

/// Trailing margin of the other 5" panels (bytes)
const MPRO5_MARGIN: u32 = 320;

/// Destination bytes per pixel (RGB565)
pub const BYTES_PER_PIXEL: u32 = 2;

/// Known screen models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Model {
    /// 5" LCD
    Mpro5,
    /// 5" OLED
    Mpro5Oled,
    /// 4.3" LCD
    Mpro4In3,
    /// 4" LCD
    Mpro4,
    /// 6.8" LCD
    Mpro6In8,
    /// 3.4" round-corner LCD
    Mpro3In4,
    /// Unrecognised screen code
    Unknown,
}

impl Model {
    /// Label shown to users
    pub const fn label(self) -> &'static str {
        match self {
            Model::Mpro5 => "MPRO-5",
            Model::Mpro5Oled => "MPRO-5H",
            Model::Mpro4In3 => "MPRO-4IN3",
            Model::Mpro4 => "MPRO-4",
            Model::Mpro6In8 => "MPRO-6IN8",
            Model::Mpro3In4 => "MPRO-3IN4",
            Model::Unknown => "MPRO",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical layout of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Physical width in mm (0 if unknown)
    pub width_mm: u32,
    /// Physical height in mm (0 if unknown)
    pub height_mm: u32,
    /// Extra bytes the panel expects after the pixel data
    pub margin: u32,
}

impl Geometry {
    const fn new(width: u32, height: u32, width_mm: u32, height_mm: u32, margin: u32) -> Self {
        Self {
            width,
            height,
            width_mm,
            height_mm,
            margin,
        }
    }
}

/// Look up the model and geometry for a screen code
///
/// The 5" LCD is the only entry that depends on the firmware version.
pub const fn lookup(screen_id: u32, firmware_version: u32) -> (Model, Geometry) {
    match screen_id {
        0x0000_0005 => {
            let margin = if firmware_version != MPRO5_NO_MARGIN_VERSION {
                MPRO5_MARGIN
            } else {
                0
            };
            (Model::Mpro5, Geometry::new(480, 854, 62, 110, margin))
        }
        0x0000_1005 => (Model::Mpro5Oled, Geometry::new(720, 1280, 62, 110, 0)),
        0x0000_0304 => (Model::Mpro4In3, Geometry::new(480, 800, 56, 94, 0)),
        0x0000_0004 | 0x0000_0b04 | 0x0000_0104 => {
            (Model::Mpro4, Geometry::new(480, 800, 53, 86, 0))
        }
        0x0000_0007 => (Model::Mpro6In8, Geometry::new(800, 480, 89, 148, 0)),
        0x0000_0403 => (Model::Mpro3In4, Geometry::new(800, 800, 88, 88, 0)),
        _ => (Model::Unknown, Geometry::new(480, 800, 0, 0, 0)),
    }
}

/// Whether a screen accepts partial (rectangle) draw commands
pub const fn supports_partial(screen_id: u32) -> bool {
    screen_id > FULL_FRAME_ONLY_MAX_SCREEN
}

/// Identity and geometry of the attached screen
///
/// Built once at attach time and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelDescriptor {
    /// Raw screen code
    pub screen_id: u32,
    /// Raw firmware version code
    pub firmware_version: u32,
    /// Opaque 8-byte device tag
    pub device_id: [u8; 8],
    /// Resolved model
    pub model: Model,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Physical width in mm (0 if unknown)
    pub width_mm: u32,
    /// Physical height in mm (0 if unknown)
    pub height_mm: u32,
    /// Extra bytes appended to the frame buffer
    pub margin: u32,
    /// Refresh rate
    pub refresh_hz: u32,
}

/// Resolve a screen code and firmware version to a panel descriptor
///
/// Never fails. The device id is left zeroed; see
/// [`PanelDescriptor::with_device_id`].
pub fn resolve(screen_id: u32, firmware_version: u32) -> PanelDescriptor {
    let (model, geometry) = lookup(screen_id, firmware_version);
    PanelDescriptor {
        screen_id,
        firmware_version,
        device_id: [0; 8],
        model,
        width: geometry.width,
        height: geometry.height,
        width_mm: geometry.width_mm,
        height_mm: geometry.height_mm,
        margin: geometry.margin,
        refresh_hz: REFRESH_HZ,
    }
}

impl PanelDescriptor {
    /// Attach the device tag
    pub fn with_device_id(mut self, device_id: [u8; 8]) -> Self {
        self.device_id = device_id;
        self
    }

    /// Human-readable model label
    pub const fn model_name(&self) -> &'static str {
        self.model.label()
    }

    /// Whether this screen accepts partial draw commands
    pub const fn supports_partial(&self) -> bool {
        supports_partial(self.screen_id)
    }

    /// Last addressable pixel corners: (0, 0) to (width - 1, height - 1)
    ///
    /// A damage report equal to this rectangle means "whole panel".
    pub const fn bounding_rect(&self) -> DamageRect {
        DamageRect::new(
            0,
            0,
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
        )
    }

    /// Every pixel of the panel, end-exclusive
    pub const fn pixel_area(&self) -> DamageRect {
        DamageRect::covering(self.width, self.height)
    }

    /// Whether `damage` asks for the whole panel
    pub fn is_full_frame(&self, damage: &DamageRect) -> bool {
        *damage == self.bounding_rect() || damage.contains(&self.pixel_area())
    }

    /// Size of the device buffer: RGB565 pixels plus the trailing margin
    pub const fn block_size(&self) -> u32 {
        self.width * self.height * BYTES_PER_PIXEL + self.margin
    }
}
