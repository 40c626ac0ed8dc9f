//! Scripted in-memory screen for driver tests

use std::time::Duration;

use mpro_hal::{TransportError, UsbTransport, MAX_DELAY};
use mpro_protocol::{request, Query, QueryReply};

/// One recorded transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    ControlOut { request: u8, data: Vec<u8> },
    ControlIn { request: u8, len: usize },
    BulkOut { endpoint: u8, data: Vec<u8> },
}

/// Injected failure
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Error(TransportError),
    /// Report only this many bytes transferred
    Short(usize),
    /// Answer the reply-length read with this byte
    Ack(u8),
}

/// Answers identification queries like a real screen and records every
/// transfer it sees
pub struct MockTransport {
    pub transfers: Vec<Transfer>,
    screen_id: u32,
    version: u32,
    device_id: [u8; 8],
    pending: Option<Query>,
    faults: Vec<(usize, Fault)>,
}

impl MockTransport {
    pub fn screen(screen_id: u32, version: u32, device_id: [u8; 8]) -> Self {
        Self {
            transfers: Vec::new(),
            screen_id,
            version,
            device_id,
            pending: None,
            faults: Vec::new(),
        }
    }

    /// Fail the transfer with this zero-based index
    pub fn fail_at(&mut self, index: usize, fault: Fault) {
        self.faults.push((index, fault));
    }

    /// Fail the `offset`-th transfer from now
    pub fn fail_next(&mut self, offset: usize, fault: Fault) {
        self.fail_at(self.transfers.len() + offset, fault);
    }

    /// Transfers recorded since index `from`
    pub fn since(&self, from: usize) -> &[Transfer] {
        &self.transfers[from..]
    }

    fn record(&mut self, transfer: Transfer, timeout: Duration) -> Option<Fault> {
        assert_eq!(timeout, MAX_DELAY);
        let index = self.transfers.len();
        self.transfers.push(transfer);
        self.faults
            .iter()
            .find(|(at, _)| *at == index)
            .map(|(_, fault)| *fault)
    }

    fn reply(&self, query: Query) -> QueryReply {
        match query {
            Query::Screen => QueryReply::Screen(self.screen_id),
            Query::Version => QueryReply::Version(self.version),
            Query::DeviceId => QueryReply::DeviceId(self.device_id),
        }
    }
}

impl UsbTransport for MockTransport {
    fn control_out(
        &mut self,
        request: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        let transfer = Transfer::ControlOut {
            request,
            data: data.to_vec(),
        };
        let fault = self.record(transfer, timeout);

        if request == request::QUERY {
            self.pending = Query::ATTACH_ORDER
                .into_iter()
                .find(|q| q.token().as_slice() == data);
        }

        match fault {
            Some(Fault::Error(e)) => Err(e),
            Some(Fault::Short(n)) => Ok(n),
            _ => Ok(data.len()),
        }
    }

    fn control_in(
        &mut self,
        request: u8,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        let transfer = Transfer::ControlIn {
            request,
            len: buf.len(),
        };
        let fault = self.record(transfer, timeout);
        if let Some(Fault::Error(e)) = fault {
            return Err(e);
        }

        let query = self.pending.ok_or(TransportError::Stall)?;
        let mut body = [0u8; 16];
        let len = self
            .reply(query)
            .encode(&mut body)
            .map_err(|_| TransportError::Io)?;

        let n = match request {
            request::REPLY_LEN => {
                buf[0] = match fault {
                    Some(Fault::Ack(ack)) => ack,
                    _ => query.ack(),
                };
                1
            }
            request::REPLY => {
                let n = len.min(buf.len());
                buf[..n].copy_from_slice(&body[..n]);
                n
            }
            _ => return Err(TransportError::Stall),
        };

        match fault {
            Some(Fault::Short(short)) => Ok(short),
            _ => Ok(n),
        }
    }

    fn bulk_out(
        &mut self,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        let transfer = Transfer::BulkOut {
            endpoint,
            data: data.to_vec(),
        };
        match self.record(transfer, timeout) {
            Some(Fault::Error(e)) => Err(e),
            Some(Fault::Short(n)) => Ok(n),
            _ => Ok(data.len()),
        }
    }
}
