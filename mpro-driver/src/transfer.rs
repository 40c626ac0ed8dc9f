//! Exact-length transfers
//!
//! Every transfer to the screen must move exactly the requested number of
//! bytes within [`MAX_DELAY`]. A short transfer is reported as an error.

use mpro_hal::{UsbTransport, BULK_ENDPOINT, MAX_DELAY};

use crate::error::{IoError, Stage};

fn check(stage: Stage, expected: usize, actual: usize) -> Result<(), IoError> {
    if actual != expected {
        tracing::debug!(%stage, expected, actual, "short transfer");
        return Err(IoError::Short {
            stage,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Vendor request OUT carrying all of `data`
pub(crate) fn control_out<T: UsbTransport>(
    transport: &mut T,
    stage: Stage,
    request: u8,
    data: &[u8],
) -> Result<(), IoError> {
    let written = transport
        .control_out(request, data, MAX_DELAY)
        .map_err(|source| IoError::Transport { stage, source })?;
    check(stage, data.len(), written)
}

/// Vendor request IN filling all of `buf`
pub(crate) fn control_in<T: UsbTransport>(
    transport: &mut T,
    stage: Stage,
    request: u8,
    buf: &mut [u8],
) -> Result<(), IoError> {
    let read = transport
        .control_in(request, buf, MAX_DELAY)
        .map_err(|source| IoError::Transport { stage, source })?;
    check(stage, buf.len(), read)
}

/// Bulk OUT of all of `data` to the pixel endpoint
pub(crate) fn bulk_out<T: UsbTransport>(transport: &mut T, data: &[u8]) -> Result<(), IoError> {
    let stage = Stage::Payload;
    let written = transport
        .bulk_out(BULK_ENDPOINT, data, MAX_DELAY)
        .map_err(|source| IoError::Transport { stage, source })?;
    check(stage, data.len(), written)
}
