//! Identification handshake
//!
//! Runs the screen, version and device id query cycles in that order and
//! resolves the answers to a [`PanelDescriptor`]. Any failure aborts the
//! whole handshake; nothing from a failed cycle is kept.

use mpro_core::{panel, PanelDescriptor};
use mpro_hal::UsbTransport;
use mpro_protocol::{request, Query, QueryReply, ACK_LEN, MAX_REPLY_SIZE};

use crate::error::{ProtocolError, Stage};
use crate::transfer;

/// Run one query cycle and decode the reply
pub fn query<T: UsbTransport>(transport: &mut T, query: Query) -> Result<QueryReply, ProtocolError> {
    let io = |source| ProtocolError::Io { query, source };

    transfer::control_out(transport, Stage::Query, request::QUERY, query.token()).map_err(io)?;

    let mut ack = [0u8; ACK_LEN];
    transfer::control_in(transport, Stage::ReplyLength, request::REPLY_LEN, &mut ack)
        .map_err(io)?;
    tracing::trace!(%query, ack = ack[0], "reply length");
    query
        .check_ack(ack[0])
        .map_err(|source| ProtocolError::Reply { query, source })?;

    let mut reply = [0u8; MAX_REPLY_SIZE];
    let reply = &mut reply[..query.reply_len()];
    transfer::control_in(transport, Stage::Reply, request::REPLY, reply).map_err(io)?;

    query
        .parse_reply(reply)
        .map_err(|source| ProtocolError::Reply { query, source })
}

/// Identify the attached screen
pub fn identify<T: UsbTransport>(transport: &mut T) -> Result<PanelDescriptor, ProtocolError> {
    let mut screen_id = 0;
    let mut version = 0;
    let mut device_id = [0u8; 8];

    for q in Query::ATTACH_ORDER {
        match query(transport, q)? {
            QueryReply::Screen(v) => screen_id = v,
            QueryReply::Version(v) => version = v,
            QueryReply::DeviceId(id) => device_id = id,
        }
    }

    let panel = panel::resolve(screen_id, version).with_device_id(device_id);
    tracing::info!(
        model = panel.model_name(),
        width = panel.width,
        height = panel.height,
        "screen identified (id {:#010x}, version {:#010x})",
        screen_id,
        version
    );
    Ok(panel)
}
