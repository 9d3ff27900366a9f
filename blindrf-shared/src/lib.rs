//! Codec for the 433 MHz command protocol spoken by motorized blind remotes.
//!
//! A transmission is a single 64-bit word:
//!
//! ```text
//! [prefix 24b][remote id 8b][channel field 16b][command 16b]
//! |----- static -----|------------ calculated ------------|
//! ```
//!
//! Encoding goes channel -> offset -> command -> [`Payload`]; decoding splits a captured
//! word and searches the small channel and button space to recover the inputs.

pub mod channel;
pub mod codec;
pub mod decoder;
mod error;
pub mod protocol;
pub mod remotes;

pub use channel::Channel;
pub use decoder::{decode, DecodedCommand, Decoder};
pub use error::{Error, Result};
pub use protocol::{Button, Payload, Transmission};
pub use remotes::Registry;
