#![deny(unsafe_code)]

//! MQTT frame value types exchanged between the wire codec and the protocol pipeline
//!
//! ## Core Features:
//! - **Fixed Header Model**: packet type, flags and remaining length as plain fields
//! - **CONNECT / CONNACK Frames**: variable header and payload structures for MQTT 3.1, 3.1.1 and 5.0
//! - **MQTT 5 Properties**: ordered property list with typed lookups
//! - **Decode Outcome**: every [`DecodedFrame`] carries a [`DecodeResult`] describing whether parsing succeeded
//!
//! Byte-level encoding and decoding is owned by the transport codec; this crate only
//! defines the values it produces and consumes.
//!
//! ```
//! use pmqtt_codec::{ConnectFrame, ConnectPayload, ConnectVariableHeader, DecodedFrame};
//!
//! let connect = ConnectFrame::new(
//!     ConnectVariableHeader::default(),
//!     ConnectPayload { client_id: "sensor-7".into(), ..Default::default() },
//! );
//! let decoded = DecodedFrame::from(connect);
//! assert!(decoded.decode_result().is_success());
//! ```

#[macro_use]
mod utils;

/// Decode failure causes
pub mod error;

/// Shared types and constants for MQTT protocol
pub mod types;

/// MQTT 5 properties
pub mod properties;

mod connack;
mod connect;
mod frame;

pub use self::connack::{ConnAckFrame, ConnAckVariableHeader, ConnectReturnCode};
pub use self::connect::{ConnectFrame, ConnectPayload, ConnectVariableHeader};
pub use self::error::DecodeError;
pub use self::frame::{DecodeResult, DecodedFrame, Payload, VariableHeader};
pub use self::properties::{Properties, Property, UserProperty};
pub use self::types::{ConnectFlags, FixedHeader, MessageType, QoS};
