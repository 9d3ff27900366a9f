//! Payload assembly and field split.

use log::trace;

use crate::protocol::PROTOCOL_PREFIX;
use crate::{Button, Channel, Payload, Result, Transmission};

/// The four fields of a payload, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub prefix: u32,
    pub remote_id: u8,
    pub channel_field: u16,
    pub command: u16,
}

impl Fields {
    pub fn pack(self) -> Payload {
        Payload::from_u64(
            (u64::from(self.prefix & 0x00ff_ffff) << 40)
                | (u64::from(self.remote_id) << 32)
                | (u64::from(self.channel_field) << 16)
                | u64::from(self.command),
        )
    }
}

/// Split a payload into its fields. The prefix is reported, not checked.
pub fn split(payload: Payload) -> Fields {
    Fields {
        prefix: payload.prefix(),
        remote_id: payload.remote_id(),
        channel_field: payload.channel_field(),
        command: payload.command(),
    }
}

/// Build the payload for one frame.
pub fn encode(remote_id: u8, channel: Channel, button: Button) -> Payload {
    let payload = Fields {
        prefix: PROTOCOL_PREFIX,
        remote_id,
        channel_field: channel.field(),
        command: button.command(remote_id, channel.offset()),
    }
    .pack();

    trace!(
        "encode remote 0x{:02x} ch{} {} -> {}",
        remote_id,
        channel,
        button,
        payload
    );

    payload
}

impl Payload {
    /// Typed counterpart of [`assemble`]; same as [`encode`].
    pub fn assemble(remote_id: u8, channel: Channel, button: Button) -> Payload {
        encode(remote_id, channel, button)
    }
}

/// Build every frame for a button press: the action, plus a trailer for UP and DOWN.
pub fn encode_transmission(remote_id: u8, channel: Channel, button: Button) -> Transmission {
    let trailer = if button.has_trailer() {
        Some(encode(remote_id, channel, Button::Trailer))
    } else {
        None
    };

    Transmission {
        button,
        remote_id,
        channel,
        action: encode(remote_id, channel, button),
        trailer,
    }
}

/// Command value for a remote, channel number and button name.
pub fn command(remote_id: u8, channel: i64, button: &str) -> Result<u16> {
    let channel = Channel::new(channel)?;
    let button: Button = button.parse()?;

    Ok(button.command(remote_id, channel.offset()))
}

/// Payload for a remote, channel number and button name.
pub fn assemble(remote_id: u8, channel: i64, button: &str) -> Result<Payload> {
    let channel = Channel::new(channel)?;
    let button: Button = button.parse()?;

    Ok(encode(remote_id, channel, button))
}

/// Frames for a remote, channel number and button name.
pub fn transmission(remote_id: u8, channel: i64, button: &str) -> Result<Transmission> {
    let channel = Channel::new(channel)?;
    let button: Button = button.parse()?;

    Ok(encode_transmission(remote_id, channel, button))
}
