use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::{Channel, Error, Result};

/// Constant upper 24 bits of every transmission.
pub const PROTOCOL_PREFIX: u32 = 0x5c5d92;

/// Payload length on the wire.
pub const PAYLOAD_LEN: usize = 8;

/// Low-order bits some demodulators append after the 64 payload bits.
pub const GUARD_BITS: u32 = 4;

/// Remote control buttons, in decode search order.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Button {
    Up,
    Down,
    Stop,
    /// Follow-up frame sent after `Up` and `Down`. Never pressed on its own.
    Trailer,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Up, Button::Down, Button::Stop, Button::Trailer];

    /// Base command before remote id and channel offset are applied.
    pub fn base(self) -> u16 {
        match self {
            Button::Up => 0xf3e8,
            Button::Down => 0xbbb0,
            Button::Stop => 0xdbd0,
            Button::Trailer => 0xdacf,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::Up => "UP",
            Button::Down => "DOWN",
            Button::Stop => "STOP",
            Button::Trailer => "TRAILER",
        }
    }

    /// Whether a press is followed by a trailer frame.
    pub fn has_trailer(self) -> bool {
        matches!(self, Button::Up | Button::Down)
    }

    /// `base + remote_id - offset`, modulo 2^16.
    pub fn command(self, remote_id: u8, offset: i8) -> u16 {
        self.base()
            .wrapping_add(u16::from(remote_id))
            .wrapping_sub(offset as i16 as u16)
    }

    /// Reverse lookup of a command value. First match in [`Button::ALL`] order wins.
    pub fn resolve(command: u16, remote_id: u8, offset: i8) -> Option<Button> {
        Button::ALL
            .iter()
            .copied()
            .find(|button| button.command(remote_id, offset) == command)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Button {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Button::ALL
            .iter()
            .copied()
            .find(|button| button.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownButton(s.to_string()))
    }
}

impl TryFrom<&str> for Button {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

/// A complete 64-bit transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload(u64);

impl Payload {
    pub fn from_u64(value: u64) -> Self {
        Payload(value)
    }

    pub fn from_bytes(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Payload(u64::from_be_bytes(bytes))
    }

    /// Normalize a demodulator word. Values wider than 64 bits carry guard bits and are
    /// shifted down first; anything still wider keeps only its low 64 bits.
    pub fn from_raw(raw: u128) -> Self {
        let raw = if raw > u128::from(u64::MAX) {
            raw >> GUARD_BITS
        } else {
            raw
        };

        Payload(raw as u64)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Big-endian wire bytes.
    pub fn to_bytes(self) -> [u8; PAYLOAD_LEN] {
        self.0.to_be_bytes()
    }

    pub fn prefix(self) -> u32 {
        (self.0 >> 40) as u32
    }

    pub fn remote_id(self) -> u8 {
        (self.0 >> 32) as u8
    }

    pub fn channel_field(self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub fn command(self) -> u16 {
        self.0 as u16
    }

    pub fn has_protocol_prefix(self) -> bool {
        self.prefix() == PROTOCOL_PREFIX
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::LowerHex for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Frames emitted by a single button press.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub button: Button,
    #[serde(serialize_with = "serialize_remote_id")]
    pub remote_id: u8,
    pub channel: Channel,
    pub action: Payload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer: Option<Payload>,
}

impl Transmission {
    /// Frames in transmit order.
    pub fn frames(&self) -> impl Iterator<Item = Payload> {
        std::iter::once(self.action).chain(self.trailer)
    }
}

pub(crate) fn serialize_remote_id<S: Serializer>(
    remote_id: &u8,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("0x{:02x}", remote_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_parse_is_case_insensitive() {
        assert_eq!("up".parse::<Button>().unwrap(), Button::Up);
        assert_eq!("Down".parse::<Button>().unwrap(), Button::Down);
        assert_eq!("STOP".parse::<Button>().unwrap(), Button::Stop);
        assert_eq!(Button::try_from("trailer").unwrap(), Button::Trailer);
    }

    #[test]
    fn test_button_parse_unknown() {
        let err = "LEFT".parse::<Button>().unwrap_err();
        assert!(matches!(err, Error::UnknownButton(ref name) if name == "LEFT"));
    }

    #[test]
    fn test_command_wraps() {
        // 0xf3e8 + 0x45 - (-126)
        assert_eq!(Button::Up.command(0x45, -126), 0xf4ab);
        // 0xbbb0 + 0x00 - 66
        assert_eq!(Button::Down.command(0x00, 66), 0xbb6e);
        assert_eq!(Button::Up.command(0xff, 0), 0xf4e7);
    }

    #[test]
    fn test_resolve_button() {
        for button in Button::ALL.iter().copied() {
            let cmd = button.command(0x93, 18);
            assert_eq!(Button::resolve(cmd, 0x93, 18), Some(button));
        }
        assert_eq!(Button::resolve(0x0000, 0x93, 18), None);
    }

    #[test]
    fn test_payload_fields() {
        let payload = Payload::from_u64(0x5c5d_9245_efff_f41b);
        assert_eq!(payload.prefix(), PROTOCOL_PREFIX);
        assert_eq!(payload.remote_id(), 0x45);
        assert_eq!(payload.channel_field(), 0xefff);
        assert_eq!(payload.command(), 0xf41b);
        assert_eq!(
            payload.to_bytes(),
            [0x5c, 0x5d, 0x92, 0x45, 0xef, 0xff, 0xf4, 0x1b]
        );
        assert_eq!(Payload::from_bytes(payload.to_bytes()), payload);
        assert_eq!(payload.to_string(), "5c5d9245effff41b");
    }

    #[test]
    fn test_payload_from_raw_strips_guard_bits() {
        let payload = 0x5c5d_9293_0000_f47bu64;
        for guard in 0..16u128 {
            let raw = (u128::from(payload) << 4) | guard;
            assert_eq!(Payload::from_raw(raw).as_u64(), payload);
        }
        assert_eq!(Payload::from_raw(u128::from(payload)).as_u64(), payload);
    }

    #[test]
    fn test_transmission_json_with_trailer() {
        let tx = crate::codec::transmission(0x93, 0, "up").unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "button": "UP",
                "remote_id": "0x93",
                "channel": "CC",
                "action": "5c5d92930000f47b",
                "trailer": "5c5d92930000db62",
            })
        );
    }

    #[test]
    fn test_transmission_json_without_trailer() {
        let tx = crate::codec::transmission(0x45, 5, "stop").unwrap();
        assert_eq!(
            serde_json::to_string(&tx).unwrap(),
            r#"{"button":"STOP","remote_id":"0x45","channel":5,"action":"5c5d9245efffdc03"}"#
        );
    }

    #[test]
    fn test_display_pads_to_16_digits() {
        assert_eq!(Payload::from_u64(0x1).to_string(), "0000000000000001");
    }
}
