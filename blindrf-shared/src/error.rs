/// Errors raised while building a transmission.
///
/// Decoding never fails; unresolved fields are reported in the
/// [`DecodedCommand`](crate::DecodedCommand) instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Channel outside 0-16 (or not `CC`).
    #[error("channel must be 0-16 or CC, got {0}")]
    InvalidChannel(String),

    /// Button name is not one of the four protocol actions.
    #[error("button must be one of UP, DOWN, STOP, TRAILER, got {0:?}")]
    UnknownButton(String),

    /// Remote id does not fit in a byte.
    #[error("remote id must be 0x00-0xff, got {0:?}")]
    InvalidRemoteId(String),

    /// A remote registry document could not be parsed.
    #[cfg(feature = "utils")]
    #[error("invalid remote registry: {0}")]
    Registry(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
