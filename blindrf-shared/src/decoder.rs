use std::fmt;

use log::debug;
use serde::Serialize;

use crate::codec::split;
use crate::protocol::serialize_remote_id;
use crate::{Button, Channel, Payload, Registry};

/// Result of decoding one captured word.
///
/// Unresolved parts are `None` rather than errors, a partially decoded frame is still
/// useful when looking at noisy captures or protocol variants.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedCommand {
    pub payload: Payload,
    /// The 24-bit prefix matched the protocol constant.
    pub recognized: bool,
    #[serde(serialize_with = "serialize_remote_id")]
    pub remote_id: u8,
    pub channel: Option<Channel>,
    pub button: Option<Button>,
    /// Prefix, channel and button all resolved.
    pub resolved: bool,
}

/// Decode a captured word.
///
/// Accepts plain 64-bit payloads as well as words with 4 trailing guard bits.
pub fn decode(raw: u128) -> DecodedCommand {
    let payload = Payload::from_raw(raw);
    let fields = split(payload);
    let recognized = payload.has_protocol_prefix();

    if !recognized {
        debug!(
            "{}: prefix 0x{:06x} is not a blind remote transmission",
            payload, fields.prefix
        );
    }

    let channel = Channel::from_field(fields.channel_field);
    if channel.is_none() {
        debug!(
            "{}: no channel for field 0x{:04x}",
            payload, fields.channel_field
        );
    }

    let offset = channel.map(Channel::offset).unwrap_or(0);

    let button = Button::resolve(fields.command, fields.remote_id, offset);
    if button.is_none() {
        debug!("{}: no button for command 0x{:04x}", payload, fields.command);
    }

    DecodedCommand {
        payload,
        recognized,
        remote_id: fields.remote_id,
        channel,
        button,
        resolved: recognized && channel.is_some() && button.is_some(),
    }
}

impl DecodedCommand {
    fn write_summary(&self, f: &mut fmt::Formatter<'_>, remote: &str) -> fmt::Result {
        if !self.recognized {
            f.write_str("unrecognized ")?;
        }

        write!(f, "{} ch", remote)?;

        match self.channel {
            Some(channel) => write!(f, "{}", channel)?,
            None => f.write_str("?")?,
        }

        match self.button {
            Some(button) => write!(f, " {}", button),
            None => f.write_str(" ?"),
        }
    }
}

impl fmt::Display for DecodedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_summary(f, &format!("0x{:02x}", self.remote_id))
    }
}

struct Summary<'a> {
    cmd: &'a DecodedCommand,
    remote: String,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cmd.write_summary(f, &self.remote)
    }
}

/// Decoder that renders results with remote names.
///
/// The registry only changes how results are shown; [`Decoder::decode`] returns the same
/// fields as the free [`decode`] whatever names are registered.
#[derive(Debug, Clone)]
pub struct Decoder {
    remotes: Registry,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(Registry::builtin())
    }
}

impl Decoder {
    pub fn new(remotes: Registry) -> Self {
        Decoder { remotes }
    }

    pub fn remotes(&self) -> &Registry {
        &self.remotes
    }

    /// Same as [`decode`]. Names are applied by [`Decoder::describe`].
    pub fn decode(&self, raw: u128) -> DecodedCommand {
        decode(raw)
    }

    pub fn decode_codes(&self, codes: &[u128]) -> Vec<DecodedCommand> {
        codes.iter().map(|&raw| decode(raw)).collect()
    }

    /// `"{remote} ch{channel|CC|?} {button|?}"`, e.g. `living_room chCC UP`.
    pub fn describe(&self, cmd: &DecodedCommand) -> String {
        Summary {
            cmd,
            remote: self.remotes.label(cmd.remote_id),
        }
        .to_string()
    }
}
