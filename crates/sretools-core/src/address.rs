use crate::error::{ParseError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// IPv4 address
///
/// Stored as an unsigned 32-bit integer in network order, so the top octet
/// occupies bits 24..32. Serializes as its dotted-quad string.
///
/// # Examples
///
/// ```
/// use sretools_core::Ipv4Address;
///
/// let addr: Ipv4Address = "10.0.16.1".parse().unwrap();
/// assert_eq!(addr.to_u32(), 0x0A001001);
/// assert_eq!(addr.octets(), [10, 0, 16, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Address(pub u32);

impl Ipv4Address {
    /// Lowest address, `0.0.0.0`
    pub const MIN: Ipv4Address = Ipv4Address(0);
    /// Highest address, `255.255.255.255`
    pub const MAX: Ipv4Address = Ipv4Address(u32::MAX);

    /// Get the address as a u32
    pub fn to_u32(self) -> u32 {
        self.0
    }

    /// Get the four octets, most significant first
    pub fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

/// Parse a dotted-quad IPv4 address
///
/// Accepts exactly four `.`-separated decimal tokens in [0, 255]. Leading
/// zeros are read as decimal. No whitespace or sign characters are allowed
/// inside a token.
///
/// # Examples
///
/// ```
/// use sretools_core::{parse_address, ParseError};
///
/// assert_eq!(parse_address("8.8.8.8").unwrap().to_u32(), 0x08080808);
/// assert_eq!(parse_address("1.2.3"), Err(ParseError::WrongSegmentCount(3)));
/// ```
pub fn parse_address(text: &str) -> Result<Ipv4Address> {
    let segments: Vec<&str> = text.split('.').collect();
    if segments.len() != 4 {
        return Err(ParseError::WrongSegmentCount(segments.len()));
    }

    let mut value = 0u32;
    for segment in segments {
        value = (value << 8) | u32::from(parse_octet(segment)?);
    }

    Ok(Ipv4Address(value))
}

fn parse_octet(segment: &str) -> Result<u8> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidOctet(segment.to_string()));
    }
    segment
        .parse::<u8>()
        .map_err(|_| ParseError::InvalidOctet(segment.to_string()))
}

/// Format an address as a canonical dotted quad (no leading zeros)
pub fn format_address(addr: Ipv4Address) -> String {
    addr.to_string()
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for Ipv4Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_address(s)
    }
}

impl From<u32> for Ipv4Address {
    fn from(value: u32) -> Self {
        Ipv4Address(value)
    }
}

impl From<Ipv4Address> for u32 {
    fn from(addr: Ipv4Address) -> Self {
        addr.0
    }
}

impl From<[u8; 4]> for Ipv4Address {
    fn from(octets: [u8; 4]) -> Self {
        Ipv4Address(u32::from_be_bytes(octets))
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Ipv4Address(u32::from(addr))
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        Ipv4Addr::from(addr.0)
    }
}

impl Serialize for Ipv4Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_address(&text).map_err(serde::de::Error::custom)
    }
}
