use pmqtt_codec::{
    ConnAckFrame, ConnAckVariableHeader, ConnectReturnCode, FixedHeader, MessageType, Properties, QoS,
};

/// CONNACK without session state.
#[inline]
pub fn conn_ack(return_code: ConnectReturnCode) -> ConnAckFrame {
    conn_ack_with(return_code, false)
}

#[inline]
pub fn conn_ack_with(return_code: ConnectReturnCode, session_present: bool) -> ConnAckFrame {
    conn_ack_with_properties(return_code, session_present, Properties::new())
}

/// MQTT 5 CONNACK, e.g. carrying the assigned client identifier.
///
/// The remaining length is left at zero, the encoder computes it.
pub fn conn_ack_with_properties(
    return_code: ConnectReturnCode,
    session_present: bool,
    properties: Properties,
) -> ConnAckFrame {
    ConnAckFrame {
        fixed_header: FixedHeader::new(MessageType::ConnAck, false, QoS::AtMostOnce, false, 0),
        variable_header: ConnAckVariableHeader { return_code, session_present, properties },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conn_ack() {
        let ack = conn_ack(ConnectReturnCode::ConnectionAccepted);
        assert_eq!(ack.fixed_header.message_type, MessageType::ConnAck);
        assert_eq!(ack.fixed_header.qos, QoS::AtMostOnce);
        assert!(!ack.fixed_header.dup);
        assert!(!ack.fixed_header.retain);
        assert_eq!(ack.fixed_header.remaining_length, 0);
        assert_eq!(ack.return_code(), ConnectReturnCode::ConnectionAccepted);
        assert!(!ack.session_present());
        assert!(ack.variable_header.properties.is_empty());

        let present = conn_ack_with(ConnectReturnCode::ConnectionAccepted, true);
        assert_eq!(present.fixed_header, ack.fixed_header);
        assert_eq!(present.return_code(), ack.return_code());
        assert!(present.session_present());
    }

    #[test]
    fn test_refused_codes() {
        for code in [
            ConnectReturnCode::UnacceptableProtocolVersion,
            ConnectReturnCode::IdentifierRejected,
            ConnectReturnCode::ServerUnavailable,
            ConnectReturnCode::BadUserNameOrPassword,
            ConnectReturnCode::NotAuthorized,
        ] {
            let ack = conn_ack(code);
            assert_eq!(ack.return_code(), code);
            assert!(!ack.return_code().is_accepted());
        }
    }

    #[test]
    fn test_conn_ack_with_properties() {
        let mut props = Properties::new();
        props.set_assigned_client_id("c000020175b6553f100".into());
        let ack = conn_ack_with_properties(ConnectReturnCode::ConnectionAccepted, false, props);
        assert_eq!(ack.fixed_header, conn_ack(ConnectReturnCode::ConnectionAccepted).fixed_header);
        assert_eq!(
            ack.variable_header.properties.assigned_client_id().map(|s| &s[..]),
            Some("c000020175b6553f100")
        );
    }
}
