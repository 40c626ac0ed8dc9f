//! Device information report

use std::fmt;

use mpro_core::{Capabilities, PanelDescriptor, PixelFormat};

/// Snapshot of an attached screen, printed as `key: value` lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub model: &'static str,
    pub screen_id: u32,
    pub firmware_version: u32,
    pub device_id: [u8; 8],
    pub width: u32,
    pub height: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub margin: u32,
    pub refresh_hz: u32,
    pub format: PixelFormat,
    pub stride: u32,
    pub block_size: u32,
    pub flip_x: bool,
    pub partial_updates: bool,
}

impl DeviceInfo {
    pub(crate) fn new(
        panel: &PanelDescriptor,
        format: PixelFormat,
        caps: &Capabilities,
        stride: u32,
        block_size: u32,
    ) -> Self {
        Self {
            model: panel.model_name(),
            screen_id: panel.screen_id,
            firmware_version: panel.firmware_version,
            device_id: panel.device_id,
            width: panel.width,
            height: panel.height,
            width_mm: panel.width_mm,
            height_mm: panel.height_mm,
            margin: panel.margin,
            refresh_hz: panel.refresh_hz,
            format,
            stride,
            block_size,
            flip_x: caps.flip_x,
            partial_updates: caps.partial_updates,
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "model: {}", self.model)?;
        writeln!(f, "screen: {:#010x}", self.screen_id)?;
        writeln!(f, "version: {:#010x}", self.firmware_version)?;
        write!(f, "id: ")?;
        for byte in self.device_id {
            write!(f, "{:02x}", byte)?;
        }
        writeln!(f)?;
        writeln!(f, "resolution: {}x{}", self.width, self.height)?;
        writeln!(f, "size: {}x{} mm", self.width_mm, self.height_mm)?;
        writeln!(f, "refresh: {} Hz", self.refresh_hz)?;
        writeln!(f, "margin: {}", self.margin)?;
        writeln!(f, "format: {}", self.format)?;
        writeln!(f, "stride: {}", self.stride)?;
        writeln!(f, "block size: {}", self.block_size)?;
        writeln!(f, "flip x: {}", on_off(self.flip_x))?;
        write!(f, "partial updates: {}", on_off(self.partial_updates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpro_core::{panel, DriverConfig};

    #[test]
    fn test_report_lines() {
        let panel = panel::resolve(0x0000_1005, 2).with_device_id([0xde, 0xad, 0, 1, 2, 3, 4, 5]);
        let (caps, _) = Capabilities::resolve(&DriverConfig::default(), &panel);
        let info = DeviceInfo::new(&panel, PixelFormat::Rgb565, &caps, 1440, panel.block_size());
        let text = info.to_string();

        assert!(text.starts_with("model: MPRO-5H\n"));
        assert!(text.contains("screen: 0x00001005\n"));
        assert!(text.contains("version: 0x00000002\n"));
        assert!(text.contains("id: dead000102030405\n"));
        assert!(text.contains("resolution: 720x1280\n"));
        assert!(text.contains("size: 62x110 mm\n"));
        assert!(text.contains("stride: 1440\n"));
        assert!(text.contains("block size: 1843200\n"));
        assert!(text.ends_with("partial updates: off"));
    }
}
