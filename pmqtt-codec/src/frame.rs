use std::num::NonZeroU16;

use bytes::Bytes;
use bytestring::ByteString;
use serde::{Deserialize, Serialize};

use crate::connack::{ConnAckFrame, ConnAckVariableHeader};
use crate::connect::{ConnectFrame, ConnectPayload, ConnectVariableHeader};
use crate::error::DecodeError;
use crate::properties::Properties;
use crate::types::{FixedHeader, MessageType, QoS};

/// Outcome of decoding a frame from wire bytes
#[derive(Debug, PartialEq, Eq, Clone, Default, Deserialize, Serialize)]
pub enum DecodeResult {
    #[default]
    Success,
    Failure(DecodeError),
}

impl DecodeResult {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, DecodeResult::Success)
    }

    #[inline]
    pub fn cause(&self) -> Option<&DecodeError> {
        match self {
            DecodeResult::Success => None,
            DecodeResult::Failure(e) => Some(e),
        }
    }
}

impl From<Result<(), DecodeError>> for DecodeResult {
    fn from(r: Result<(), DecodeError>) -> Self {
        match r {
            Ok(()) => DecodeResult::Success,
            Err(e) => DecodeResult::Failure(e),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub enum VariableHeader {
    None,
    Connect(Box<ConnectVariableHeader>),
    ConnAck(ConnAckVariableHeader),
    /// PUBACK, PUBREC, PUBREL, PUBCOMP, SUBSCRIBE, SUBACK, UNSUBSCRIBE, UNSUBACK
    PacketId(NonZeroU16),
    Publish { topic: ByteString, packet_id: Option<NonZeroU16>, properties: Properties },
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub enum Payload {
    None,
    Connect(Box<ConnectPayload>),
    Bytes(Bytes),
}

/// A frame as handed over by the codec, tagged with its decode outcome.
///
/// A failed decode still carries whatever header the codec managed to read.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct DecodedFrame {
    pub fixed_header: FixedHeader,
    pub variable_header: VariableHeader,
    pub payload: Payload,
    pub decode_result: DecodeResult,
}

impl DecodedFrame {
    pub fn new(fixed_header: FixedHeader, variable_header: VariableHeader, payload: Payload) -> Self {
        Self { fixed_header, variable_header, payload, decode_result: DecodeResult::Success }
    }

    /// Frame whose decoding failed after the fixed header was read
    pub fn failure(fixed_header: FixedHeader, cause: DecodeError) -> Self {
        Self {
            fixed_header,
            variable_header: VariableHeader::None,
            payload: Payload::None,
            decode_result: DecodeResult::Failure(cause),
        }
    }

    /// PINGREQ, PINGRESP, DISCONNECT (v3)
    pub fn empty(message_type: MessageType) -> Self {
        Self::new(
            FixedHeader::new(message_type, false, QoS::AtMostOnce, false, 0),
            VariableHeader::None,
            Payload::None,
        )
    }

    #[inline]
    pub fn message_type(&self) -> MessageType {
        self.fixed_header.message_type
    }

    #[inline]
    pub fn decode_result(&self) -> &DecodeResult {
        &self.decode_result
    }

    /// Returns the CONNECT frame if this is a successfully decoded CONNECT, otherwise gives the frame back.
    pub fn into_connect(self) -> Result<ConnectFrame, DecodedFrame> {
        match (self.fixed_header.message_type, self.variable_header, self.payload, self.decode_result) {
            (
                MessageType::Connect,
                VariableHeader::Connect(variable_header),
                Payload::Connect(payload),
                DecodeResult::Success,
            ) => Ok(ConnectFrame {
                fixed_header: self.fixed_header,
                variable_header: *variable_header,
                payload: *payload,
            }),
            (_, variable_header, payload, decode_result) => {
                Err(DecodedFrame { fixed_header: self.fixed_header, variable_header, payload, decode_result })
            }
        }
    }
}

impl From<ConnectFrame> for DecodedFrame {
    fn from(f: ConnectFrame) -> Self {
        DecodedFrame::new(
            f.fixed_header,
            VariableHeader::Connect(Box::new(f.variable_header)),
            Payload::Connect(Box::new(f.payload)),
        )
    }
}

impl From<ConnAckFrame> for DecodedFrame {
    fn from(f: ConnAckFrame) -> Self {
        DecodedFrame::new(f.fixed_header, VariableHeader::ConnAck(f.variable_header), Payload::None)
    }
}
