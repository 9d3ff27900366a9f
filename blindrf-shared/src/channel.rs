use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// Highest addressable channel.
pub const MAX_CHANNEL: u8 = 16;

/// A validated channel selector.
///
/// `0` is broadcast (`CC`, all channels), `1..=16` address a single blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    /// Broadcast to all channels.
    pub const BROADCAST: Channel = Channel(0);

    pub fn new(channel: i64) -> Result<Self> {
        if (0..=i64::from(MAX_CHANNEL)).contains(&channel) {
            Ok(Channel(channel as u8))
        } else {
            Err(Error::InvalidChannel(channel.to_string()))
        }
    }

    /// All 17 channels, broadcast first.
    pub fn iter() -> impl Iterator<Item = Channel> {
        (0..=MAX_CHANNEL).map(Channel)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_broadcast(self) -> bool {
        self.0 == 0
    }

    /// Signed term subtracted from the button base command.
    ///
    /// `2 + 2^((channel - 1) mod 8)` squeezed into an 8-bit two's-complement lane, so
    /// channels 8 and 16 (raw 130) come out as -126.
    pub fn offset(self) -> i8 {
        if self.is_broadcast() {
            return 0;
        }

        let exponent = (self.0 - 1) % 8;
        let raw = 2i16 + (1i16 << exponent);

        if raw >= 128 {
            (raw - 256) as i8
        } else {
            raw as i8
        }
    }

    /// 16-bit channel bitmask sent on the wire.
    ///
    /// ```text
    /// Channel | Field  | Bit cleared
    /// --------|--------|------------
    ///    CC   | 0x0000 | (broadcast)
    ///     1   | 0xfeff | bit 8
    ///     8   | 0x7fff | bit 15
    ///     9   | 0xfffe | bit 0
    ///    16   | 0xff7f | bit 7
    /// ```
    pub fn field(self) -> u16 {
        if self.is_broadcast() {
            return 0x0000;
        }

        0xffff ^ (1 << ((u32::from(self.0) + 7) % 16))
    }

    /// Inverse of [`Channel::field`]. Returns `None` for bitmasks no channel produces.
    pub fn from_field(field: u16) -> Option<Channel> {
        if field == 0x0000 {
            return Some(Channel::BROADCAST);
        }

        Channel::iter()
            .skip(1)
            .find(|channel| channel.field() == field)
    }
}

/// Channel offset for a raw channel number.
pub fn offset(channel: i64) -> Result<i8> {
    Channel::new(channel).map(Channel::offset)
}

/// Channel field for a raw channel number.
pub fn field(channel: i64) -> Result<u16> {
    Channel::new(channel).map(Channel::field)
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_broadcast() {
            f.write_str("CC")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("cc") {
            return Ok(Channel::BROADCAST);
        }

        s.parse::<i64>()
            .map_err(|_| Error::InvalidChannel(s.to_string()))
            .and_then(Channel::new)
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_broadcast() {
            serializer.serialize_str("CC")
        } else {
            serializer.serialize_u8(self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSETS: [i8; 17] = [
        0, 3, 4, 6, 10, 18, 34, 66, -126, 3, 4, 6, 10, 18, 34, 66, -126,
    ];

    const FIELDS: [u16; 17] = [
        0x0000, 0xfeff, 0xfdff, 0xfbff, 0xf7ff, 0xefff, 0xdfff, 0xbfff, 0x7fff, 0xfffe, 0xfffd,
        0xfffb, 0xfff7, 0xffef, 0xffdf, 0xffbf, 0xff7f,
    ];

    #[test]
    fn test_offset_table() {
        for (n, expected) in OFFSETS.iter().enumerate() {
            assert_eq!(offset(n as i64).unwrap(), *expected, "channel {}", n);
        }
    }

    #[test]
    fn test_offset_wraps_on_channels_8_and_16() {
        assert_eq!(offset(8).unwrap(), -126);
        assert_eq!(offset(16).unwrap(), -126);
    }

    #[test]
    fn test_field_table() {
        for (n, expected) in FIELDS.iter().enumerate() {
            assert_eq!(field(n as i64).unwrap(), *expected, "channel {}", n);
        }
    }

    #[test]
    fn test_field_is_bijective() {
        let mut fields: Vec<u16> = Channel::iter().map(Channel::field).collect();
        fields.sort_unstable();
        fields.dedup();
        assert_eq!(fields.len(), 17);

        for channel in Channel::iter() {
            let weight = channel.field().count_ones();
            if channel.is_broadcast() {
                assert_eq!(weight, 0);
            } else {
                assert_eq!(weight, 15);
            }
            assert_eq!(Channel::from_field(channel.field()), Some(channel));
        }
    }

    #[test]
    fn test_from_field_unknown() {
        assert_eq!(Channel::from_field(0xffff), None);
        assert_eq!(Channel::from_field(0xfefe), None);
        assert_eq!(Channel::from_field(0x1234), None);
    }

    #[test]
    fn test_invalid_channel() {
        assert!(matches!(offset(17), Err(Error::InvalidChannel(_))));
        assert!(matches!(field(-1), Err(Error::InvalidChannel(_))));
        assert!(matches!(Channel::new(255), Err(Error::InvalidChannel(_))));
    }

    #[test]
    fn test_parse_channel() {
        assert_eq!("CC".parse::<Channel>().unwrap(), Channel::BROADCAST);
        assert_eq!("cc".parse::<Channel>().unwrap(), Channel::BROADCAST);
        assert_eq!("0".parse::<Channel>().unwrap(), Channel::BROADCAST);
        assert_eq!("16".parse::<Channel>().unwrap().number(), 16);
        assert!(matches!(
            "17".parse::<Channel>(),
            Err(Error::InvalidChannel(_))
        ));
        assert!(matches!(
            "all".parse::<Channel>(),
            Err(Error::InvalidChannel(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Channel::BROADCAST.to_string(), "CC");
        assert_eq!(Channel::new(5).unwrap().to_string(), "5");
    }
}
