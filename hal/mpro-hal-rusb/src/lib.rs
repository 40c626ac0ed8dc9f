//! libusb transport for VoCore screens
//!
//! Implements [`UsbTransport`] on top of [`rusb`]. The screen enumerates as
//! a single vendor-specific interface; it is claimed on open and released
//! on drop.

use std::time::Duration;

use mpro_hal::{TransportError, UsbTransport, REQUEST_TYPE_IN, REQUEST_TYPE_OUT};
use rusb::{Context, Device, DeviceHandle, UsbContext};
use thiserror::Error;

/// VoCore USB vendor id
pub const VENDOR_ID: u16 = 0xC872;

/// MPRO screen product id
pub const PRODUCT_ID: u16 = 0x1004;

/// Interface carrying the vendor requests and the bulk endpoint
const INTERFACE: u8 = 0;

/// Errors while opening a screen
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("no VoCore screen found")]
    NotFound,

    #[error("screen #{index} not found ({count} connected)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),
}

/// One connected screen, as seen on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLocation {
    pub bus: u8,
    pub address: u8,
}

fn is_screen<T: UsbContext>(device: &Device<T>) -> bool {
    device.device_descriptor().map_or(false, |desc| {
        desc.vendor_id() == VENDOR_ID && desc.product_id() == PRODUCT_ID
    })
}

/// List connected screens in bus order
pub fn list() -> Result<Vec<ScreenLocation>, OpenError> {
    let context = Context::new()?;
    let screens = context
        .devices()?
        .iter()
        .filter(is_screen)
        .map(|d| ScreenLocation {
            bus: d.bus_number(),
            address: d.address(),
        })
        .collect();
    Ok(screens)
}

/// Transport over a claimed libusb device handle
pub struct RusbTransport {
    handle: DeviceHandle<Context>,
}

impl RusbTransport {
    /// Open the first connected screen
    pub fn open() -> Result<Self, OpenError> {
        Self::open_nth(0)
    }

    /// Open the `index`-th connected screen
    pub fn open_nth(index: usize) -> Result<Self, OpenError> {
        let context = Context::new()?;
        let screens: Vec<_> = context.devices()?.iter().filter(is_screen).collect();

        if screens.is_empty() {
            return Err(OpenError::NotFound);
        }
        let device = screens.get(index).ok_or(OpenError::IndexOutOfRange {
            index,
            count: screens.len(),
        })?;

        let mut handle = device.open()?;

        // Not supported on every platform
        if let Err(e) = handle.set_auto_detach_kernel_driver(true) {
            tracing::debug!("auto-detach unavailable: {}", e);
        }
        handle.claim_interface(INTERFACE)?;

        tracing::debug!(
            bus = device.bus_number(),
            address = device.address(),
            "screen opened"
        );
        Ok(Self { handle })
    }
}

/// Map a libusb error onto the transport taxonomy
pub fn map_error(e: rusb::Error) -> TransportError {
    match e {
        rusb::Error::Timeout => TransportError::Timeout,
        rusb::Error::NoDevice | rusb::Error::NotFound => TransportError::Disconnected,
        rusb::Error::Pipe => TransportError::Stall,
        rusb::Error::Busy => TransportError::Busy,
        other => {
            tracing::debug!("USB transfer error: {}", other);
            TransportError::Io
        }
    }
}

impl UsbTransport for RusbTransport {
    fn control_out(
        &mut self,
        request: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        self.handle
            .write_control(REQUEST_TYPE_OUT, request, 0, 0, data, timeout)
            .map_err(map_error)
    }

    fn control_in(
        &mut self,
        request: u8,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        self.handle
            .read_control(REQUEST_TYPE_IN, request, 0, 0, buf, timeout)
            .map_err(map_error)
    }

    fn bulk_out(
        &mut self,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        self.handle
            .write_bulk(endpoint, data, timeout)
            .map_err(map_error)
    }
}

impl Drop for RusbTransport {
    fn drop(&mut self) {
        release_failure(self.handle.release_interface(INTERFACE));
    }
}

/// Log a failed interface release; the device may already be gone
fn release_failure(result: rusb::Result<()>) -> Option<TransportError> {
    let e = result.err()?;
    tracing::debug!("release interface failed: {}", e);
    Some(map_error(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(map_error(rusb::Error::Timeout), TransportError::Timeout);
        assert_eq!(map_error(rusb::Error::NoDevice), TransportError::Disconnected);
        assert_eq!(map_error(rusb::Error::Pipe), TransportError::Stall);
        assert_eq!(map_error(rusb::Error::Busy), TransportError::Busy);
        assert_eq!(map_error(rusb::Error::Overflow), TransportError::Io);
    }

    #[test]
    fn test_release_failure_reported() {
        assert_eq!(release_failure(Ok(())), None);
        assert_eq!(
            release_failure(Err(rusb::Error::NoDevice)),
            Some(TransportError::Disconnected)
        );
    }
}
