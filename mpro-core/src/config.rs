//! Driver configuration and resolved capabilities
//!
//! [`DriverConfig`] is what the user asks for. [`Capabilities`] is what the
//! attached panel actually gets once the request is checked against the
//! hardware. Both are fixed for the lifetime of a device.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::panel::PanelDescriptor;

/// Default preferred colour depth
pub const DEFAULT_BITS_PER_PIXEL: u32 = 16;

/// Colour depths accepted as a preference
pub const SUPPORTED_DEPTHS: [u32; 2] = [16, 32];

/// User-facing driver options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DriverConfig {
    /// Mirror every converted scanline horizontally
    pub flip_x: bool,
    /// Send only the damaged rectangle when the panel allows it
    pub partial_updates: bool,
    /// Colour depth reported to clients (16 or 32)
    pub preferred_bits_per_pixel: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            flip_x: false,
            partial_updates: false,
            preferred_bits_per_pixel: DEFAULT_BITS_PER_PIXEL,
        }
    }
}

impl DriverConfig {
    /// Whether the preferred depth is one we can report
    pub fn depth_supported(&self) -> bool {
        SUPPORTED_DEPTHS.contains(&self.preferred_bits_per_pixel)
    }
}

/// Options in effect for one attached panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// Mirror scanlines during conversion
    pub flip_x: bool,
    /// Panel accepts partial draw commands
    pub partial_supported: bool,
    /// Partial draw commands will be used
    pub partial_updates: bool,
}

impl Capabilities {
    /// Check the requested options against the panel
    ///
    /// Early panels (screen code 2 or lower) only take full frames; partial
    /// updates are forced off for them and a warning is returned.
    pub fn resolve(
        config: &DriverConfig,
        panel: &PanelDescriptor,
    ) -> (Self, Option<CapabilityWarning>) {
        let partial_supported = panel.supports_partial();
        let caps = Self {
            flip_x: config.flip_x,
            partial_supported,
            partial_updates: config.partial_updates && partial_supported,
        };

        let warning = (!partial_supported).then_some(CapabilityWarning::PartialUnsupported {
            screen_id: panel.screen_id,
            requested: config.partial_updates,
        });

        (caps, warning)
    }
}

/// Non-fatal notice raised while resolving capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapabilityWarning {
    /// Panel only accepts full frames
    PartialUnsupported {
        screen_id: u32,
        /// Whether partial updates had been asked for
        requested: bool,
    },
}

impl fmt::Display for CapabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartialUnsupported {
                screen_id,
                requested: true,
            } => write!(
                f,
                "screen {:#010x} does not support partial updates, sending full frames",
                screen_id
            ),
            Self::PartialUnsupported { screen_id, .. } => write!(
                f,
                "screen {:#010x} does not support partial updates",
                screen_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::resolve;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert!(!config.flip_x);
        assert!(!config.partial_updates);
        assert_eq!(config.preferred_bits_per_pixel, 16);
        assert!(config.depth_supported());
    }

    #[test]
    fn test_depth_validation() {
        let mut config = DriverConfig::default();
        config.preferred_bits_per_pixel = 32;
        assert!(config.depth_supported());
        config.preferred_bits_per_pixel = 24;
        assert!(!config.depth_supported());
    }

    #[test]
    fn test_partial_kept_on_capable_panel() {
        let config = DriverConfig {
            partial_updates: true,
            ..DriverConfig::default()
        };
        let (caps, warning) = Capabilities::resolve(&config, &resolve(0x0000_0005, 0));
        assert!(caps.partial_supported);
        assert!(caps.partial_updates);
        assert_eq!(warning, None);
    }

    #[test]
    fn test_partial_forced_off_on_early_panel() {
        let config = DriverConfig {
            partial_updates: true,
            flip_x: true,
            ..DriverConfig::default()
        };
        let (caps, warning) = Capabilities::resolve(&config, &resolve(2, 0));
        assert!(!caps.partial_updates);
        assert!(caps.flip_x);
        assert_eq!(
            warning,
            Some(CapabilityWarning::PartialUnsupported {
                screen_id: 2,
                requested: true
            })
        );
    }

    #[test]
    fn test_warning_even_when_not_requested() {
        let (caps, warning) = Capabilities::resolve(&DriverConfig::default(), &resolve(1, 0));
        assert!(!caps.partial_updates);
        assert!(matches!(
            warning,
            Some(CapabilityWarning::PartialUnsupported {
                requested: false,
                ..
            })
        ));
    }
}
