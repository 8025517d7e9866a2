use std::fmt;

use bytes::Bytes;
use bytestring::ByteString;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::properties::Properties;
use crate::types::{ConnectFlags, FixedHeader, MessageType, QoS, MQTT, MQTT_LEVEL_311};

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
/// Variable header of a CONNECT frame
pub struct ConnectVariableHeader {
    /// "MQTT", or "MQIsdp" for MQTT 3.1
    pub protocol_name: ByteString,
    pub protocol_level: u8,
    pub flags: ConnectFlags,
    /// a time interval measured in seconds.
    pub keep_alive: u16,
    pub properties: Properties,
}

impl ConnectVariableHeader {
    #[inline]
    pub fn clean_session(&self) -> bool {
        self.flags.contains(ConnectFlags::CLEAN_START)
    }

    #[inline]
    pub fn has_will(&self) -> bool {
        self.flags.contains(ConnectFlags::WILL)
    }

    #[inline]
    pub fn will_retain(&self) -> bool {
        self.flags.contains(ConnectFlags::WILL_RETAIN)
    }

    #[inline]
    pub fn will_qos(&self) -> Result<QoS, DecodeError> {
        self.flags.will_qos()
    }

    #[inline]
    pub fn has_username(&self) -> bool {
        self.flags.contains(ConnectFlags::USERNAME)
    }

    #[inline]
    pub fn has_password(&self) -> bool {
        self.flags.contains(ConnectFlags::PASSWORD)
    }
}

impl Default for ConnectVariableHeader {
    fn default() -> Self {
        Self {
            protocol_name: ByteString::from_static(MQTT),
            protocol_level: MQTT_LEVEL_311,
            flags: ConnectFlags::CLEAN_START,
            keep_alive: 60,
            properties: Properties::new(),
        }
    }
}

#[derive(Default, PartialEq, Eq, Clone, Deserialize, Serialize)]
/// Payload of a CONNECT frame
pub struct ConnectPayload {
    /// identifies the Client to the Server.
    pub client_id: ByteString,
    pub will_properties: Properties,
    pub will_topic: Option<ByteString>,
    /// the Application Message that is to be published to the Will Topic
    pub will_message: Option<Bytes>,
    /// username can be used by the Server for authentication and authorization.
    pub username: Option<ByteString>,
    /// password can be used by the Server for authentication and authorization.
    pub password: Option<Bytes>,
}

impl fmt::Debug for ConnectPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectPayload")
            .field("client_id", &self.client_id)
            .field("will_properties", &self.will_properties)
            .field("will_topic", &self.will_topic)
            .field("will_message", &self.will_message)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

/// CONNECT frame
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct ConnectFrame {
    pub fixed_header: FixedHeader,
    pub variable_header: ConnectVariableHeader,
    pub payload: ConnectPayload,
}

impl ConnectFrame {
    pub fn new(variable_header: ConnectVariableHeader, payload: ConnectPayload) -> Self {
        Self {
            fixed_header: FixedHeader::new(MessageType::Connect, false, QoS::AtMostOnce, false, 0),
            variable_header,
            payload,
        }
    }

    #[inline]
    pub fn client_id(&self) -> &ByteString {
        &self.payload.client_id
    }
}
