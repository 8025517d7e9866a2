use bytes::Bytes;
use bytestring::ByteString;
use serde::{Deserialize, Serialize};

pub type UserProperty = (ByteString, ByteString);

/// MQTT v5 property identifiers
pub mod property_type {
    pub const UTF8_PAYLOAD: u8 = 0x01;
    pub const MSG_EXPIRY_INT: u8 = 0x02;
    pub const CONTENT_TYPE: u8 = 0x03;
    pub const RESP_TOPIC: u8 = 0x08;
    pub const CORR_DATA: u8 = 0x09;
    pub const SUB_ID: u8 = 0x0B;
    pub const SESS_EXPIRY_INT: u8 = 0x11;
    pub const ASSND_CLIENT_ID: u8 = 0x12;
    pub const SERVER_KA: u8 = 0x13;
    pub const AUTH_METHOD: u8 = 0x15;
    pub const AUTH_DATA: u8 = 0x16;
    pub const REQ_PROB_INFO: u8 = 0x17;
    pub const WILL_DELAY_INT: u8 = 0x18;
    pub const REQ_RESP_INFO: u8 = 0x19;
    pub const RESP_INFO: u8 = 0x1A;
    pub const SERVER_REF: u8 = 0x1C;
    pub const REASON_STRING: u8 = 0x1F;
    pub const RECEIVE_MAX: u8 = 0x21;
    pub const TOPIC_ALIAS_MAX: u8 = 0x22;
    pub const TOPIC_ALIAS: u8 = 0x23;
    pub const MAX_QOS: u8 = 0x24;
    pub const RETAIN_AVAIL: u8 = 0x25;
    pub const USER: u8 = 0x26;
    pub const MAX_PACKET_SIZE: u8 = 0x27;
    pub const WILDCARD_SUB_AVAIL: u8 = 0x28;
    pub const SUB_IDS_AVAIL: u8 = 0x29;
    pub const SHARED_SUB_AVAIL: u8 = 0x2A;
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub enum Property {
    /// Byte, two byte or four byte integer, and variable byte integer properties
    Integer(u8, u32),
    /// UTF-8 encoded string properties
    String(u8, ByteString),
    /// Binary data properties
    Binary(u8, Bytes),
    /// User property, may appear several times
    User(UserProperty),
}

impl Property {
    #[inline]
    pub fn id(&self) -> u8 {
        match self {
            Property::Integer(id, _) | Property::String(id, _) | Property::Binary(id, _) => *id,
            Property::User(_) => property_type::USER,
        }
    }
}

/// Ordered MQTT v5 property list. Empty for MQTT 3.x frames.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Properties(Vec<Property>);

impl Properties {
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    /// Adds a property. Non-user properties replace an earlier value with the same identifier.
    pub fn add(&mut self, prop: Property) {
        if !matches!(prop, Property::User(_)) {
            let id = prop.id();
            self.0.retain(|p| p.id() != id);
        }
        self.0.push(prop);
    }

    #[inline]
    pub fn with(mut self, prop: Property) -> Self {
        self.add(prop);
        self
    }

    #[inline]
    pub fn get(&self, id: u8) -> Option<&Property> {
        self.0.iter().find(|p| p.id() == id)
    }

    pub fn integer(&self, id: u8) -> Option<u32> {
        match self.get(id) {
            Some(Property::Integer(_, v)) => Some(*v),
            _ => None,
        }
    }

    pub fn string(&self, id: u8) -> Option<&ByteString> {
        match self.get(id) {
            Some(Property::String(_, v)) => Some(v),
            _ => None,
        }
    }

    pub fn binary(&self, id: u8) -> Option<&Bytes> {
        match self.get(id) {
            Some(Property::Binary(_, v)) => Some(v),
            _ => None,
        }
    }

    pub fn user_properties(&self) -> impl Iterator<Item = &UserProperty> {
        self.0.iter().filter_map(|p| match p {
            Property::User(up) => Some(up),
            _ => None,
        })
    }

    #[inline]
    pub fn assigned_client_id(&self) -> Option<&ByteString> {
        self.string(property_type::ASSND_CLIENT_ID)
    }

    #[inline]
    pub fn set_assigned_client_id(&mut self, client_id: ByteString) {
        self.add(Property::String(property_type::ASSND_CLIENT_ID, client_id));
    }
}

impl FromIterator<Property> for Properties {
    fn from_iter<T: IntoIterator<Item = Property>>(iter: T) -> Self {
        let mut props = Properties::new();
        for p in iter {
            props.add(p);
        }
        props
    }
}
