use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

pub const MQTT: &str = "MQTT";
pub const MQTT_LEVEL_31: u8 = 3;
pub const MQTT_LEVEL_311: u8 = 4;
pub const MQTT_LEVEL_5: u8 = 5;
pub(crate) const WILL_QOS_SHIFT: u8 = 3;

/// Longest client identifier a 3.1 server is required to accept
pub const MAX_CLIENT_ID_LEN: usize = 23;

prim_enum! {
    /// Quality of Service
    #[derive(Serialize, Deserialize, PartialOrd, Ord, Hash)]
    pub enum QoS {
        /// At most once delivery
        ///
        /// The message arrives at the receiver either once or not at all.
        AtMostOnce = 0,
        /// At least once delivery
        ///
        /// A QoS 1 PUBLISH Packet is acknowledged by a PUBACK Packet.
        AtLeastOnce = 1,
        /// Exactly once delivery
        ExactlyOnce = 2
    }
}

impl QoS {
    #[inline]
    pub fn value(&self) -> u8 {
        u8::from(*self)
    }
}

impl Default for QoS {
    fn default() -> Self {
        QoS::AtMostOnce
    }
}

prim_enum! {
    /// MQTT Control Packet type, the high nibble of the first fixed header byte
    #[derive(Serialize, Deserialize, Hash)]
    pub enum MessageType {
        Connect = 1,
        ConnAck = 2,
        Publish = 3,
        PubAck = 4,
        PubRec = 5,
        PubRel = 6,
        PubComp = 7,
        Subscribe = 8,
        SubAck = 9,
        Unsubscribe = 10,
        UnsubAck = 11,
        PingReq = 12,
        PingResp = 13,
        Disconnect = 14,
        Auth = 15
    }
}

impl MessageType {
    pub fn name(self) -> &'static str {
        match self {
            MessageType::Connect => "CONNECT",
            MessageType::ConnAck => "CONNACK",
            MessageType::Publish => "PUBLISH",
            MessageType::PubAck => "PUBACK",
            MessageType::PubRec => "PUBREC",
            MessageType::PubRel => "PUBREL",
            MessageType::PubComp => "PUBCOMP",
            MessageType::Subscribe => "SUBSCRIBE",
            MessageType::SubAck => "SUBACK",
            MessageType::Unsubscribe => "UNSUBSCRIBE",
            MessageType::UnsubAck => "UNSUBACK",
            MessageType::PingReq => "PINGREQ",
            MessageType::PingResp => "PINGRESP",
            MessageType::Disconnect => "DISCONNECT",
            MessageType::Auth => "AUTH",
        }
    }
}

/// Fixed header of an MQTT frame.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize, Serialize)]
pub struct FixedHeader {
    pub message_type: MessageType,
    /// this might be re-delivery of an earlier attempt to send the Packet.
    pub dup: bool,
    pub qos: QoS,
    pub retain: bool,
    /// the number of bytes remaining within the current packet,
    /// including data in the variable header and the payload.
    pub remaining_length: u32,
}

impl FixedHeader {
    #[inline]
    pub fn new(message_type: MessageType, dup: bool, qos: QoS, retain: bool, remaining_length: u32) -> Self {
        Self { message_type, dup, qos, retain, remaining_length }
    }

    /// Packs packet type and flags into the first byte on the wire.
    #[inline]
    pub fn first_byte(&self) -> u8 {
        (u8::from(self.message_type) << 4)
            | ((self.dup as u8) << 3)
            | (self.qos.value() << 1)
            | (self.retain as u8)
    }
}

bitflags::bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct ConnectFlags: u8 {
        const USERNAME    = 0b1000_0000;
        const PASSWORD    = 0b0100_0000;
        const WILL_RETAIN = 0b0010_0000;
        const WILL_QOS    = 0b0001_1000;
        const WILL        = 0b0000_0100;
        const CLEAN_START = 0b0000_0010;
    }
}

impl ConnectFlags {
    /// Will QoS carried in bits 3-4, both bits set is malformed.
    #[inline]
    pub fn will_qos(&self) -> Result<QoS, DecodeError> {
        QoS::try_from((*self & ConnectFlags::WILL_QOS).bits() >> WILL_QOS_SHIFT)
    }

    #[inline]
    pub fn with_will_qos(self, qos: QoS) -> Self {
        (self - ConnectFlags::WILL_QOS) | ConnectFlags::from_bits_retain(qos.value() << WILL_QOS_SHIFT)
    }
}

impl Serialize for ConnectFlags {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for ConnectFlags {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(d)?;
        let flags =
            ConnectFlags::from_bits(bits).ok_or_else(|| serde::de::Error::custom("connect reserved flag is set"))?;
        flags.will_qos().map_err(|_| serde::de::Error::custom("invalid will qos"))?;
        Ok(flags)
    }
}
