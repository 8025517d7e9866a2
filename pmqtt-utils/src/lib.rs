#![deny(unsafe_code)]

//! CONNECT-path frame shaping for the pmqtt protocol handler
//!
//! ## Core Features:
//! - **Frame Validation**: [`validate`] turns a failed codec decode into a [`ProtocolDecodeError`]
//! - **CONNACK Construction**: [`conn_ack`], [`conn_ack_with`] and [`conn_ack_with_properties`]
//! - **Client Identifier Assignment**: [`ClientIdGenerator`] derives an identifier from the remote
//!   address, port and current second, or falls back to a random UUID, never exceeding 23 characters
//! - **CONNECT Rebuilding**: [`with_client_id`] copies a CONNECT frame with a substituted identifier
//! - **Logger Bootstrap**: [`logger`] routes the `log` facade into an async slog drain
//!
//! All frame operations are pure, they take their inputs by reference and return new values.
//!
//! ```
//! use pmqtt_utils::codec::{ConnectFrame, ConnectPayload, ConnectReturnCode, ConnectVariableHeader, DecodedFrame};
//! use pmqtt_utils::{assign_client_id, conn_ack, validate, ClientIdGenerator, Endpoint};
//!
//! let decoded = DecodedFrame::from(ConnectFrame::new(ConnectVariableHeader::default(), ConnectPayload::default()));
//! validate(&decoded).unwrap();
//!
//! let connect = decoded.into_connect().unwrap();
//! let endpoint = Endpoint::from("192.0.2.1:1883".parse::<std::net::SocketAddr>().unwrap());
//! let connect = assign_client_id(&connect, &ClientIdGenerator::new(), Some(&endpoint)).unwrap_or(connect);
//! assert!(connect.client_id().len() <= 23);
//!
//! let ack = conn_ack(ConnectReturnCode::ConnectionAccepted);
//! assert!(!ack.session_present());
//! ```

mod ack;
mod check;
mod client_id;
mod connect;
mod error;

pub mod logger;

pub use pmqtt_codec as codec;

pub use self::ack::{conn_ack, conn_ack_with, conn_ack_with_properties};
pub use self::check::validate;
pub use self::client_id::{
    create_client_identifier, ClientId, ClientIdGenerator, Clock, Endpoint, RandomSource, SystemClock,
    ThreadRandom,
};
pub use self::connect::{assign_client_id, with_client_id};
pub use self::error::ProtocolDecodeError;

/// Timestamp representation in seconds since Unix epoch
pub type Timestamp = i64;

/// Get current timestamp in seconds
///
/// # Example:
/// ```
/// let ts = pmqtt_utils::timestamp_secs();
/// assert!(ts > 0);
/// ```
#[inline]
pub fn timestamp_secs() -> Timestamp {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|t| t.as_secs() as i64)
        .unwrap_or_else(|_| chrono::Local::now().timestamp())
}
