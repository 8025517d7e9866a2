use bytestring::ByteString;
use serde::{Deserialize, Serialize};

/// Cause attached to a frame whose decoding failed.
///
/// The `Display` text is what gets surfaced to the protocol pipeline, so free-form
/// causes reported by the codec keep their original wording.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid protocol")]
    InvalidProtocol,
    #[error("Invalid length")]
    InvalidLength,
    #[error("Malformed packet")]
    MalformedPacket,
    #[error("Unsupported protocol level")]
    UnsupportedProtocolLevel,
    #[error("Connect frame's reserved flag is set")]
    ConnectReservedFlagSet,
    #[error("ConnectAck frame's reserved flag is set")]
    ConnAckReservedFlagSet,
    #[error("Invalid client id")]
    InvalidClientId,
    #[error("Unsupported packet type")]
    UnsupportedPacketType,
    #[error("Max size exceeded")]
    MaxSizeExceeded,
    #[error("utf8 error")]
    Utf8Error,
    #[error("{0}")]
    Other(ByteString),
}

impl DecodeError {
    #[inline]
    pub fn other<T>(cause: T) -> Self
    where
        ByteString: From<T>,
    {
        DecodeError::Other(cause.into())
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(e: std::io::Error) -> DecodeError {
        DecodeError::Other(ByteString::from(format!("io error, {e}")))
    }
}
