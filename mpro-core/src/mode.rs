//! Display mode
//!
//! Every panel exposes exactly one fixed mode.

use core::fmt;

use crate::panel::PanelDescriptor;

/// The single mode a panel can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeInfo {
    pub width: u32,
    pub height: u32,
    pub refresh_hz: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    /// Colour depth clients should prefer
    pub preferred_depth: u32,
}

impl ModeInfo {
    /// Mode of `panel`
    pub fn fixed(panel: &PanelDescriptor, preferred_depth: u32) -> Self {
        Self {
            width: panel.width,
            height: panel.height,
            refresh_hz: panel.refresh_hz,
            width_mm: panel.width_mm,
            height_mm: panel.height_mm,
            preferred_depth,
        }
    }

    /// Whether a requested mode matches this one
    ///
    /// Physical size and depth are informational and not compared.
    pub fn accepts(&self, candidate: &ModeInfo) -> bool {
        self.width == candidate.width
            && self.height == candidate.height
            && self.refresh_hz == candidate.refresh_hz
    }
}

impl fmt::Display for ModeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}Hz", self.width, self.height, self.refresh_hz)
    }
}
