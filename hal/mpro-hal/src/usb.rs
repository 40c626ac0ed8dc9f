//! USB transfer abstractions
//!
//! The screen is driven through vendor requests on the default control pipe
//! plus a single bulk OUT endpoint that carries the frame buffer. Every
//! transfer is synchronous and bounded by a timeout; there is no
//! cancellation and no retry at this layer.

use core::fmt;
use core::time::Duration;

/// Upper bound for every transfer issued to the screen
pub const MAX_DELAY: Duration = Duration::from_millis(100);

/// Host-to-device vendor request (USB_DIR_OUT | USB_TYPE_VENDOR | USB_RECIP_DEVICE)
pub const REQUEST_TYPE_OUT: u8 = 0x40;

/// Device-to-host vendor request (USB_DIR_IN | USB_TYPE_VENDOR | USB_RECIP_DEVICE)
pub const REQUEST_TYPE_IN: u8 = 0xC0;

/// Bulk OUT endpoint carrying pixel data
pub const BULK_ENDPOINT: u8 = 0x02;

/// Transfer failures reported by a transport backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Transfer did not complete within the timeout
    Timeout,
    /// Device was unplugged (or never answered)
    Disconnected,
    /// Endpoint stalled / request rejected by the device
    Stall,
    /// Interface or endpoint busy
    Busy,
    /// Any other host-side I/O failure
    Io,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "transfer timed out"),
            Self::Disconnected => write!(f, "device disconnected"),
            Self::Stall => write!(f, "endpoint stalled"),
            Self::Busy => write!(f, "device busy"),
            Self::Io => write!(f, "USB I/O error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

/// Synchronous USB transport
///
/// Implementations issue vendor requests with `wValue = 0` and `wIndex = 0`
/// on the default pipe, using [`REQUEST_TYPE_OUT`] / [`REQUEST_TYPE_IN`] as
/// the request type. Each method returns the number of bytes actually
/// transferred; deciding whether a short transfer is acceptable is left to
/// the caller.
pub trait UsbTransport {
    /// Send `data` with a host-to-device vendor request
    fn control_out(
        &mut self,
        request: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError>;

    /// Receive into `buf` with a device-to-host vendor request
    fn control_in(
        &mut self,
        request: u8,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError>;

    /// Write `data` to a bulk OUT endpoint
    fn bulk_out(
        &mut self,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError>;
}

// Lets callers lend a transport to a driver without giving it up.
impl<T: UsbTransport + ?Sized> UsbTransport for &mut T {
    fn control_out(
        &mut self,
        request: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).control_out(request, data, timeout)
    }

    fn control_in(
        &mut self,
        request: u8,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).control_in(request, buf, timeout)
    }

    fn bulk_out(
        &mut self,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).bulk_out(endpoint, data, timeout)
    }
}
