//! Server side client identifier assignment
//!
//! A connection coming from an IP socket gets an identifier derived from its remote
//! address, port and the current second, everything else gets a random UUID. Both
//! are cut down to the configured maximum, 23 characters at most.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use bytestring::ByteString;
use rand::RngCore;
use uuid::Uuid;

use pmqtt_codec::types::MAX_CLIENT_ID_LEN;
use pmqtt_conf::ClientIdSettings;

use crate::timestamp_secs;

pub type ClientId = ByteString;

/// Remote end of a connection as reported by the transport
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Inet(SocketAddr),
    Unix(PathBuf),
    /// In-process or otherwise unaddressed channel
    Local(ByteString),
}

impl From<SocketAddr> for Endpoint {
    #[inline]
    fn from(addr: SocketAddr) -> Self {
        Endpoint::Inet(addr)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Inet(addr) => write!(f, "{addr}"),
            Endpoint::Unix(path) => write!(f, "unix:{}", path.display()),
            Endpoint::Local(name) => write!(f, "local:{name}"),
        }
    }
}

/// Source of the current time in whole seconds since the Unix epoch
pub trait Clock {
    fn now_secs(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_secs(&self) -> u64 {
        timestamp_secs().max(0) as u64
    }
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    #[inline]
    fn now_secs(&self) -> u64 {
        self()
    }
}

/// Source of the 128 random bits behind a UUID based identifier
pub trait RandomSource {
    fn fill_bytes(&self, dest: &mut [u8; 16]);
}

/// Thread-local `rand` generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    #[inline]
    fn fill_bytes(&self, dest: &mut [u8; 16]) {
        rand::rng().fill_bytes(dest);
    }
}

#[derive(Debug, Clone)]
pub struct ClientIdGenerator<C = SystemClock, R = ThreadRandom> {
    clock: C,
    random: R,
    max_len: usize,
}

impl Default for ClientIdGenerator {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClientIdGenerator {
    #[inline]
    pub fn new() -> Self {
        Self::with_sources(SystemClock, ThreadRandom)
    }

    #[inline]
    pub fn from_settings(cfg: &ClientIdSettings) -> Self {
        Self::new().max_len(cfg.max_len)
    }
}

impl<C: Clock, R: RandomSource> ClientIdGenerator<C, R> {
    #[inline]
    pub fn with_sources(clock: C, random: R) -> Self {
        Self { clock, random, max_len: MAX_CLIENT_ID_LEN }
    }

    /// Clamped to `1..=23`.
    #[inline]
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len.clamp(1, MAX_CLIENT_ID_LEN);
        self
    }

    #[inline]
    pub fn get_max_len(&self) -> usize {
        self.max_len
    }

    pub fn generate(&self, endpoint: Option<&Endpoint>) -> ClientId {
        let mut client_id = match endpoint {
            Some(Endpoint::Inet(addr)) => self.inet_client_id(addr),
            _ => self.random_client_id(),
        };
        if client_id.len() > self.max_len {
            client_id.truncate(self.max_len);
        }
        log::trace!("assigned client id {client_id} for remote endpoint {endpoint:?}");
        ClientId::from(client_id)
    }

    fn inet_client_id(&self, addr: &SocketAddr) -> String {
        // IPv4-mapped addresses from dual-stack sockets identify as their IPv4 form
        let ip = match addr.ip().to_canonical() {
            IpAddr::V4(ip) => hex::encode(ip.octets()),
            IpAddr::V6(ip) => hex::encode(ip.octets()),
        };
        format!("{ip}{:x}{:x}", addr.port(), self.clock.now_secs())
    }

    fn random_client_id(&self) -> String {
        let mut bytes = [0u8; 16];
        self.random.fill_bytes(&mut bytes);
        let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        uuid.as_simple().encode_lower(&mut Uuid::encode_buffer()).to_owned()
    }
}

/// Identifier for `endpoint` using the system clock, the thread-local generator
/// and the 23 character limit.
#[inline]
pub fn create_client_identifier(endpoint: Option<&Endpoint>) -> ClientId {
    ClientIdGenerator::new().generate(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV6};
    use std::sync::atomic::{AtomicU8, Ordering};

    struct SeqRandom(AtomicU8);

    impl RandomSource for SeqRandom {
        fn fill_bytes(&self, dest: &mut [u8; 16]) {
            let b = self.0.fetch_add(0x11, Ordering::SeqCst);
            dest.fill(b);
        }
    }

    fn inet(ip: IpAddr, port: u16) -> Endpoint {
        Endpoint::Inet(SocketAddr::new(ip, port))
    }

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn test_ipv4_endpoint() {
        let g = ClientIdGenerator::with_sources(|| 1_700_000_000u64, ThreadRandom);
        let ep = inet(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 1883);
        // c0000201 | 75b | 6553f100
        assert_eq!(&g.generate(Some(&ep))[..], "c000020175b6553f100");
        let again = g.generate(Some(&ep));
        assert_eq!(g.generate(Some(&ep)), again);

        let ep = inet(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        let g = ClientIdGenerator::with_sources(|| 0u64, ThreadRandom);
        assert_eq!(&g.generate(Some(&ep))[..], "7f00000100");
    }

    #[test]
    fn test_ipv4_endpoint_truncated() {
        let g = ClientIdGenerator::with_sources(|| u64::MAX, ThreadRandom);
        let ep = inet(IpAddr::V4(Ipv4Addr::BROADCAST), 65535);
        assert_eq!(&g.generate(Some(&ep))[..], "f".repeat(23));
    }

    #[test]
    fn test_ipv6_endpoint() {
        let g = ClientIdGenerator::with_sources(|| 1_700_000_000u64, ThreadRandom);
        let ip = Ipv6Addr::new(0x2001, 0x0db8, 0, 0, 0, 0, 0, 1);
        let id = g.generate(Some(&inet(IpAddr::V6(ip), 1883)));
        assert_eq!(&id[..], "20010db8000000000000000");
        assert_eq!(id.len(), 23);

        let mapped = SocketAddr::V6(SocketAddrV6::new(Ipv4Addr::new(192, 0, 2, 1).to_ipv6_mapped(), 1883, 0, 0));
        assert_eq!(&g.generate(Some(&Endpoint::from(mapped)))[..], "c000020175b6553f100");
    }

    #[test]
    fn test_random_fallback() {
        let g = ClientIdGenerator::with_sources(|| 1_700_000_000u64, SeqRandom(AtomicU8::new(0)));
        // version and variant bits of a v4 UUID built from zeroed bytes
        assert_eq!(&g.generate(None)[..], "00000000000040008000000");
        assert_eq!(&g.generate(Some(&Endpoint::Unix("/tmp/mqtt.sock".into())))[..], "11111111111141119111111");
        assert_eq!(&g.generate(Some(&Endpoint::Local("in-vm".into())))[..], "2222222222224222a222222");
    }

    #[test]
    fn test_random_identifiers_differ() {
        let a = create_client_identifier(None);
        let b = create_client_identifier(None);
        assert_ne!(a, b);
        for id in [&a, &b] {
            assert_eq!(id.len(), 23);
            assert!(is_lower_hex(id), "{id} is not lowercase hex");
        }
    }

    #[test]
    fn test_length_invariant() {
        let endpoints = [
            None,
            Some(inet(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 1)),
            Some(inet(IpAddr::V4(Ipv4Addr::BROADCAST), u16::MAX)),
            Some(inet(IpAddr::V6(Ipv6Addr::LOCALHOST), 8883)),
            Some(inet(IpAddr::V6(Ipv6Addr::UNSPECIFIED), u16::MAX)),
            Some(Endpoint::Unix(PathBuf::from("/run/pmqtt.sock"))),
        ];
        for secs in [0u64, 1_700_000_000, u32::MAX as u64, u64::MAX] {
            let g = ClientIdGenerator::with_sources(move || secs, ThreadRandom);
            for ep in endpoints.iter() {
                let id = g.generate(ep.as_ref());
                assert!(!id.is_empty() && id.len() <= 23, "{id:?} for {ep:?}");
                assert!(is_lower_hex(&id));
            }
        }
    }

    #[test]
    fn test_max_len() {
        let g = ClientIdGenerator::with_sources(|| 1_700_000_000u64, ThreadRandom).max_len(8);
        let ep = inet(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 1883);
        assert_eq!(&g.generate(Some(&ep))[..], "c0000201");
        assert_eq!(g.generate(None).len(), 8);

        assert_eq!(ClientIdGenerator::new().max_len(64).get_max_len(), 23);
        assert_eq!(ClientIdGenerator::new().max_len(0).get_max_len(), 1);
        let cfg = ClientIdSettings { max_len: 12 };
        assert_eq!(ClientIdGenerator::from_settings(&cfg).get_max_len(), 12);
    }

    #[test]
    fn test_concurrent_generation() {
        let g = std::sync::Arc::new(ClientIdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let g = g.clone();
                std::thread::spawn(move || (0..64).map(|_| g.generate(None)).collect::<Vec<_>>())
            })
            .collect();
        let mut all = std::collections::HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(id.len() <= 23);
                all.insert(id);
            }
        }
        assert_eq!(all.len(), 4 * 64);
    }
}
