//! Tool configuration
//!
//! ```toml
//! [driver]
//! flip_x = false
//! partial_updates = false
//! preferred_bits_per_pixel = 16
//!
//! [device]
//! index = 0
//! ```
//!
//! Every key is optional; missing keys take their defaults.

pub mod loader;

use mpro_driver::DriverConfig;
use serde::Deserialize;

/// Contents of `mpro.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    pub driver: DriverConfig,
    pub device: DeviceSection,
}

/// Which screen to open
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceSection {
    /// Position among connected screens, in bus order
    pub index: usize,
}

/// Command-line overrides applied on top of the file
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub flip_x: bool,
    pub partial: bool,
    pub index: Option<usize>,
}

impl ScreenConfig {
    /// Apply flags given on the command line
    pub fn apply(&mut self, overrides: Overrides) {
        if overrides.flip_x {
            self.driver.flip_x = true;
        }
        if overrides.partial {
            self.driver.partial_updates = true;
        }
        if let Some(index) = overrides.index {
            self.device.index = index;
        }
    }
}
