use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sretools_core::{parse_address, Ipv4Address, ParseError, Result};
use std::fmt;
use std::str::FromStr;

/// Network mask for a prefix length
///
/// `/0` is an explicit all-zero branch so no shift by 32 ever happens.
/// Prefix lengths above 32 saturate to the host mask.
///
/// ```
/// use sretools_cidr::mask_for;
///
/// assert_eq!(mask_for(0), 0);
/// assert_eq!(mask_for(24), 0xFFFF_FF00);
/// assert_eq!(mask_for(32), u32::MAX);
/// ```
pub fn mask_for(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        1..=32 => u32::MAX << (32 - u32::from(prefix_len)),
        _ => u32::MAX,
    }
}

/// CIDR block representation
///
/// Keeps the address exactly as written; [`CidrBlock::network`] gives the
/// masked base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrBlock {
    address: Ipv4Address,
    prefix_len: u8,
}

impl CidrBlock {
    /// Create a block from an address and prefix length
    pub fn new(address: Ipv4Address, prefix_len: u8) -> Result<Self> {
        if prefix_len > 32 {
            return Err(ParseError::InvalidPrefixLength(prefix_len.to_string()));
        }
        Ok(Self {
            address,
            prefix_len,
        })
    }

    /// Parse strict CIDR notation
    ///
    /// # Examples
    ///
    /// ```
    /// use sretools_cidr::CidrBlock;
    ///
    /// let block = CidrBlock::parse("10.0.0.0/8").unwrap();
    /// assert_eq!(block.prefix_len(), 8);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        parse_cidr(text)
    }

    /// Parse CIDR notation, treating a bare address as a `/32` host route
    ///
    /// Used for fetched range records, which may omit the prefix.
    pub fn parse_or_host(text: &str) -> Result<Self> {
        match text.split_once('/') {
            Some((address, prefix)) => from_parts(address, prefix),
            None => Ok(Self {
                address: parse_address(text)?,
                prefix_len: 32,
            }),
        }
    }

    /// Address as written
    pub fn address(&self) -> Ipv4Address {
        self.address
    }

    /// Prefix length (0-32)
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Network mask as an address (e.g. `255.255.255.0`)
    pub fn mask(&self) -> Ipv4Address {
        Ipv4Address(mask_for(self.prefix_len))
    }

    /// Network address (address AND mask)
    pub fn network(&self) -> Ipv4Address {
        Ipv4Address(self.address.to_u32() & mask_for(self.prefix_len))
    }

    /// Broadcast address (network OR NOT mask)
    pub fn broadcast(&self) -> Ipv4Address {
        Ipv4Address(self.network().to_u32() | !mask_for(self.prefix_len))
    }

    /// Total number of addresses in the block
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix_len))
    }

    /// Check if an address falls inside this block
    pub fn contains(&self, addr: Ipv4Address) -> bool {
        let mask = mask_for(self.prefix_len);
        addr.to_u32() & mask == self.address.to_u32() & mask
    }

    /// Same block with the address replaced by its network address
    pub fn normalized(&self) -> Self {
        Self {
            address: self.network(),
            prefix_len: self.prefix_len,
        }
    }
}

/// Parse strict `<ipv4>/<prefix>` notation
///
/// A missing slash, empty address, or non-numeric prefix is
/// [`ParseError::InvalidFormat`]; a numeric prefix outside [0, 32] is
/// [`ParseError::InvalidPrefixLength`]. Address errors are passed through.
pub fn parse_cidr(text: &str) -> Result<CidrBlock> {
    let (address, prefix) = text
        .split_once('/')
        .ok_or_else(|| ParseError::InvalidFormat(format!("missing '/' in '{}'", text)))?;
    from_parts(address, prefix)
}

fn from_parts(address: &str, prefix: &str) -> Result<CidrBlock> {
    if address.is_empty() {
        return Err(ParseError::InvalidFormat("missing address".to_string()));
    }

    let prefix_len = parse_prefix(prefix)?;
    let address = parse_address(address)?;

    Ok(CidrBlock {
        address,
        prefix_len,
    })
}

fn parse_prefix(prefix: &str) -> Result<u8> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(format!(
            "prefix '{}' is not a number",
            prefix
        )));
    }

    prefix
        .parse::<u8>()
        .ok()
        .filter(|len| *len <= 32)
        .ok_or_else(|| ParseError::InvalidPrefixLength(prefix.to_string()))
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for CidrBlock {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_cidr(s)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_cidr(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cidr() {
        let cidr = parse_cidr("192.168.1.0/24").unwrap();
        assert_eq!(cidr.network(), Ipv4Address(0xC0A80100));
        assert_eq!(cidr.prefix_len(), 24);
    }

    #[test]
    fn test_parse_cidr_slash_8() {
        let cidr = CidrBlock::parse("10.0.0.0/8").unwrap();
        assert_eq!(cidr.network(), Ipv4Address(0x0A000000));
        assert_eq!(cidr.prefix_len(), 8);
    }

    #[test]
    fn test_parse_keeps_literal_address() {
        let cidr = parse_cidr("192.168.1.77/24").unwrap();
        assert_eq!(cidr.address().to_string(), "192.168.1.77");
        assert_eq!(cidr.network().to_string(), "192.168.1.0");
        assert_eq!(cidr.to_string(), "192.168.1.77/24");
        assert_eq!(cidr.normalized().to_string(), "192.168.1.0/24");
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(matches!(
            parse_cidr("192.168.1.0"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(parse_cidr("/24"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(
            parse_cidr("10.0.0.0/"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/abc"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/24/8"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/+8"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_invalid_prefix_length() {
        assert_eq!(
            parse_cidr("192.168.1.0/33"),
            Err(ParseError::InvalidPrefixLength("33".to_string()))
        );
        assert_eq!(
            parse_cidr("192.168.1.0/1000"),
            Err(ParseError::InvalidPrefixLength("1000".to_string()))
        );
    }

    #[test]
    fn test_parse_address_errors_propagate() {
        assert_eq!(
            parse_cidr("300.1.1.1/24"),
            Err(ParseError::InvalidOctet("300".to_string()))
        );
        assert_eq!(
            parse_cidr("10.0.0/24"),
            Err(ParseError::WrongSegmentCount(3))
        );
    }

    #[test]
    fn test_parse_or_host() {
        let host = CidrBlock::parse_or_host("52.95.110.1").unwrap();
        assert_eq!(host.prefix_len(), 32);
        assert_eq!(host.size(), 1);

        let block = CidrBlock::parse_or_host("52.95.110.0/23").unwrap();
        assert_eq!(block.prefix_len(), 23);

        assert!(CidrBlock::parse_or_host("2600:1f18::/33").is_err());
    }

    #[test]
    fn test_new() {
        let cidr = CidrBlock::new(Ipv4Address(0xC0A80100), 24).unwrap();
        assert_eq!(cidr.network(), Ipv4Address(0xC0A80100));
        assert!(CidrBlock::new(Ipv4Address(0), 33).is_err());
    }

    #[test]
    fn test_mask_for() {
        assert_eq!(mask_for(0), 0);
        assert_eq!(mask_for(1), 0x8000_0000);
        assert_eq!(mask_for(22), 0xFFFF_FC00);
        assert_eq!(mask_for(31), 0xFFFF_FFFE);
        assert_eq!(mask_for(32), 0xFFFF_FFFF);
        assert_eq!(mask_for(40), 0xFFFF_FFFF);
    }

    #[test]
    fn test_contains() {
        let cidr = parse_cidr("192.168.1.0/24").unwrap();
        assert!(cidr.contains(Ipv4Address(0xC0A80100))); // 192.168.1.0
        assert!(cidr.contains(Ipv4Address(0xC0A80101))); // 192.168.1.1
        assert!(cidr.contains(Ipv4Address(0xC0A801FF))); // 192.168.1.255
        assert!(!cidr.contains(Ipv4Address(0xC0A80001))); // 192.168.0.1
        assert!(!cidr.contains(Ipv4Address(0xC0A80200))); // 192.168.2.0
    }

    #[test]
    fn test_contains_everything_at_slash_0() {
        let cidr = parse_cidr("1.2.3.4/0").unwrap();
        assert!(cidr.contains(Ipv4Address::MIN));
        assert!(cidr.contains(Ipv4Address::MAX));
    }

    #[test]
    fn test_size() {
        assert_eq!(parse_cidr("192.168.1.0/24").unwrap().size(), 256);
        assert_eq!(parse_cidr("10.0.0.0/8").unwrap().size(), 16777216);
        assert_eq!(parse_cidr("0.0.0.0/0").unwrap().size(), 4294967296);
    }

    #[test]
    fn test_serialization() {
        let cidr = parse_cidr("10.0.16.0/22").unwrap();
        let json = serde_json::to_string(&cidr).unwrap();
        assert_eq!(json, "\"10.0.16.0/22\"");
        let back: CidrBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cidr);
    }
}
