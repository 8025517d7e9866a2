use std::net::SocketAddr;

use bytes::Bytes;

use pmqtt_conf::logging::To;
use pmqtt_conf::Settings;
use pmqtt_utils::codec::{
    ConnectFlags, ConnectFrame, ConnectPayload, ConnectReturnCode, ConnectVariableHeader, DecodeError,
    DecodedFrame, FixedHeader, MessageType, QoS,
};
use pmqtt_utils::{
    assign_client_id, conn_ack, conn_ack_with_properties, logger, validate, ClientIdGenerator, Endpoint,
};

fn client_connect(client_id: &str) -> DecodedFrame {
    DecodedFrame::from(ConnectFrame::new(
        ConnectVariableHeader {
            flags: ConnectFlags::CLEAN_START | ConnectFlags::USERNAME | ConnectFlags::PASSWORD,
            ..Default::default()
        },
        ConnectPayload {
            client_id: client_id.into(),
            username: Some("device".into()),
            password: Some(Bytes::from_static(b"s3cret")),
            ..Default::default()
        },
    ))
}

#[test]
fn test_connect_flow() {
    let settings = Settings::from_toml("[log]\nto = \"off\"\nlevel = \"trace\"\n").unwrap();
    assert_eq!(settings.log.to, To::Off);
    logger::init_from_settings(&settings).unwrap();

    let generator = ClientIdGenerator::from_settings(&settings.client_id);
    let endpoint = Endpoint::from("192.0.2.1:1883".parse::<SocketAddr>().unwrap());

    // decode -> validate -> assign -> rebuild -> acknowledge
    let decoded = client_connect("");
    validate(&decoded).unwrap();
    let connect = decoded.into_connect().unwrap();
    let assigned = assign_client_id(&connect, &generator, Some(&endpoint)).unwrap();

    assert!(assigned.client_id().starts_with("c000020175b"));
    assert!(assigned.client_id().len() <= 23);
    assert_eq!(assigned.payload.username, connect.payload.username);
    assert_eq!(assigned.payload.password, connect.payload.password);
    assert_eq!(assigned.variable_header, connect.variable_header);

    let mut props = pmqtt_utils::codec::Properties::new();
    props.set_assigned_client_id(assigned.client_id().clone());
    let ack = conn_ack_with_properties(ConnectReturnCode::ConnectionAccepted, false, props);
    assert_eq!(ack.variable_header.properties.assigned_client_id(), Some(assigned.client_id()));
    assert_eq!(ack.fixed_header.first_byte(), 0x20);

    // a client supplied identifier is kept
    let connect = client_connect("sensor-7").into_connect().unwrap();
    assert!(assign_client_id(&connect, &generator, Some(&endpoint)).is_none());

    log::info!("connect flow finished");
}

#[test]
fn test_rejected_decode() {
    let decoded = DecodedFrame::failure(
        FixedHeader::new(MessageType::Connect, false, QoS::AtMostOnce, false, 0),
        DecodeError::other("bad remaining length"),
    );
    let err = validate(&decoded).unwrap_err();
    assert_eq!(err.to_string(), "bad remaining length");

    // the pipeline answers with a refusal
    let ack = conn_ack(ConnectReturnCode::UnacceptableProtocolVersion);
    assert_eq!(ack.return_code(), ConnectReturnCode::UnacceptableProtocolVersion);
    assert_eq!(ack.fixed_header.remaining_length, 0);
}
