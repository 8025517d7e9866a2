use pmqtt_codec::DecodeError;

/// Raised when the codec reported a failed decode for a frame handed to the pipeline.
///
/// Displays as the codec's cause description, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{cause}")]
pub struct ProtocolDecodeError {
    cause: DecodeError,
}

impl ProtocolDecodeError {
    #[inline]
    pub fn message(&self) -> String {
        self.cause.to_string()
    }

    #[inline]
    pub fn cause(&self) -> &DecodeError {
        &self.cause
    }
}

impl From<DecodeError> for ProtocolDecodeError {
    #[inline]
    fn from(cause: DecodeError) -> Self {
        Self { cause }
    }
}
