use pmqtt_codec::{DecodeResult, DecodedFrame};

use crate::error::ProtocolDecodeError;

/// Fails with the codec's cause if `frame` was not decoded successfully.
#[inline]
pub fn validate(frame: &DecodedFrame) -> Result<(), ProtocolDecodeError> {
    match frame.decode_result() {
        DecodeResult::Success => Ok(()),
        DecodeResult::Failure(cause) => {
            log::debug!("{} frame failed to decode, reason: {}", frame.message_type().name(), cause);
            Err(ProtocolDecodeError::from(cause.clone()))
        }
    }
}
