use serde::{Deserialize, Serialize};

use crate::properties::Properties;
use crate::types::{FixedHeader, MessageType, QoS};

prim_enum! {
    /// CONNACK return codes, MQTT 3.1.1 (0..=5) and MQTT 5 reason codes (0x80..)
    #[derive(Deserialize, Serialize, Hash)]
    pub enum ConnectReturnCode {
        /// Connection accepted
        ConnectionAccepted = 0x00,
        /// Connection Refused, unacceptable protocol version
        UnacceptableProtocolVersion = 0x01,
        /// Connection Refused, identifier rejected
        IdentifierRejected = 0x02,
        /// Connection Refused, Server unavailable
        ServerUnavailable = 0x03,
        /// Connection Refused, bad user name or password
        BadUserNameOrPassword = 0x04,
        /// Connection Refused, not authorized
        NotAuthorized = 0x05,

        UnspecifiedError = 0x80,
        MalformedPacket = 0x81,
        ProtocolError = 0x82,
        ImplementationSpecificError = 0x83,
        UnsupportedProtocolVersion = 0x84,
        ClientIdentifierNotValid = 0x85,
        BadUserNameOrPasswordV5 = 0x86,
        NotAuthorizedV5 = 0x87,
        ServerUnavailableV5 = 0x88,
        ServerBusy = 0x89,
        Banned = 0x8A,
        BadAuthenticationMethod = 0x8C,
        TopicNameInvalid = 0x90,
        PacketTooLarge = 0x95,
        QuotaExceeded = 0x97,
        PayloadFormatInvalid = 0x99,
        RetainNotSupported = 0x9A,
        QosNotSupported = 0x9B,
        UseAnotherServer = 0x9C,
        ServerMoved = 0x9D,
        ConnectionRateExceeded = 0x9F
    }
}

impl ConnectReturnCode {
    #[inline]
    pub fn is_accepted(self) -> bool {
        matches!(self, ConnectReturnCode::ConnectionAccepted)
    }

    /// Whether the code only exists in MQTT 5
    #[inline]
    pub fn is_v5(self) -> bool {
        u8::from(self) >= 0x80
    }

    pub fn reason(self) -> &'static str {
        match self {
            ConnectReturnCode::ConnectionAccepted => "Connection Accepted",
            ConnectReturnCode::UnacceptableProtocolVersion => "Connection Refused, unacceptable protocol version",
            ConnectReturnCode::IdentifierRejected => "Connection Refused, identifier rejected",
            ConnectReturnCode::ServerUnavailable => "Connection Refused, Server unavailable",
            ConnectReturnCode::BadUserNameOrPassword => "Connection Refused, bad user name or password",
            ConnectReturnCode::NotAuthorized => "Connection Refused, not authorized",
            ConnectReturnCode::UnsupportedProtocolVersion => "protocol version is not supported",
            ConnectReturnCode::ClientIdentifierNotValid => "client identifier is invalid",
            ConnectReturnCode::BadUserNameOrPasswordV5 => "bad user name or password",
            ConnectReturnCode::NotAuthorizedV5 => "not authorized",
            ConnectReturnCode::ServerUnavailableV5 => "Server unavailable",
            ConnectReturnCode::ServerBusy => "Server busy",
            ConnectReturnCode::Banned => "Banned",
            _ => "Connection Refused",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
/// Variable header of a CONNACK frame
pub struct ConnAckVariableHeader {
    pub return_code: ConnectReturnCode,
    /// enables a Client to establish whether the Client and Server have a consistent view
    /// about whether there is already stored Session state.
    pub session_present: bool,
    /// MQTT 5 only, empty otherwise
    pub properties: Properties,
}

/// CONNACK frame
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct ConnAckFrame {
    pub fixed_header: FixedHeader,
    pub variable_header: ConnAckVariableHeader,
}

impl ConnAckFrame {
    #[inline]
    pub fn return_code(&self) -> ConnectReturnCode {
        self.variable_header.return_code
    }

    #[inline]
    pub fn session_present(&self) -> bool {
        self.variable_header.session_present
    }
}

impl From<ConnAckVariableHeader> for ConnAckFrame {
    fn from(variable_header: ConnAckVariableHeader) -> Self {
        Self {
            fixed_header: FixedHeader::new(MessageType::ConnAck, false, QoS::AtMostOnce, false, 0),
            variable_header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_code_reason() {
        assert_eq!(ConnectReturnCode::ConnectionAccepted.reason(), "Connection Accepted");
        assert_eq!(ConnectReturnCode::IdentifierRejected.reason(), "Connection Refused, identifier rejected");
        assert_eq!(ConnectReturnCode::ServerUnavailable.reason(), "Connection Refused, Server unavailable");
        assert_eq!(ConnectReturnCode::QuotaExceeded.reason(), "Connection Refused");
    }

    #[test]
    fn test_return_code_values() {
        assert_eq!(ConnectReturnCode::try_from(0x02u8).unwrap(), ConnectReturnCode::IdentifierRejected);
        assert_eq!(ConnectReturnCode::try_from(0x85u8).unwrap(), ConnectReturnCode::ClientIdentifierNotValid);
        assert!(ConnectReturnCode::try_from(0x06u8).is_err());
        assert!(ConnectReturnCode::ConnectionAccepted.is_accepted());
        assert!(!ConnectReturnCode::NotAuthorized.is_v5());
        assert!(ConnectReturnCode::Banned.is_v5());
    }
}
