use crate::block::{mask_for, CidrBlock};
use serde::Serialize;
use sretools_core::Ipv4Address;

/// How the usable host range of a block is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetKind {
    /// Prefix 0 to 30: network and broadcast are reserved
    Standard,
    /// Prefix 31 (RFC 3021): both addresses are hosts, no reserved pair
    PointToPoint,
    /// Prefix 32: a single address
    HostRoute,
}

/// Facts derived from a CIDR block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetInfo {
    /// The block as entered
    pub cidr: CidrBlock,
    pub network: Ipv4Address,
    pub broadcast: Ipv4Address,
    pub subnet_mask: Ipv4Address,
    pub wildcard_mask: Ipv4Address,
    /// `None` for /31 and /32
    pub first_usable: Option<Ipv4Address>,
    /// `None` for /31 and /32
    pub last_usable: Option<Ipv4Address>,
    pub total_hosts: u64,
    pub usable_hosts: u64,
    pub kind: SubnetKind,
}

impl SubnetInfo {
    /// Check if an address lies between network and broadcast (inclusive)
    pub fn contains(&self, addr: Ipv4Address) -> bool {
        self.network <= addr && addr <= self.broadcast
    }

    /// Inclusive `(network, broadcast)` bounds
    pub fn address_range(&self) -> (Ipv4Address, Ipv4Address) {
        (self.network, self.broadcast)
    }
}

/// Compute subnet details for a block
///
/// # Examples
///
/// ```
/// use sretools_cidr::{compute_subnet, parse_cidr, SubnetKind};
///
/// let info = compute_subnet(&parse_cidr("192.168.1.0/24").unwrap());
/// assert_eq!(info.subnet_mask.to_string(), "255.255.255.0");
/// assert_eq!(info.first_usable.unwrap().to_string(), "192.168.1.1");
/// assert_eq!(info.usable_hosts, 254);
/// assert_eq!(info.kind, SubnetKind::Standard);
/// ```
pub fn compute_subnet(block: &CidrBlock) -> SubnetInfo {
    let prefix_len = block.prefix_len();
    let mask = mask_for(prefix_len);
    let network = block.address().to_u32() & mask;
    let broadcast = network | !mask;
    let total_hosts = block.size();

    let (kind, first_usable, last_usable, usable_hosts) = match prefix_len {
        32 => (SubnetKind::HostRoute, None, None, 0),
        31 => (SubnetKind::PointToPoint, None, None, 2),
        // At least two host bits, so neither step can wrap
        _ => (
            SubnetKind::Standard,
            Some(Ipv4Address(network + 1)),
            Some(Ipv4Address(broadcast - 1)),
            total_hosts - 2,
        ),
    };

    SubnetInfo {
        cidr: *block,
        network: Ipv4Address(network),
        broadcast: Ipv4Address(broadcast),
        subnet_mask: Ipv4Address(mask),
        wildcard_mask: Ipv4Address(!mask),
        first_usable,
        last_usable,
        total_hosts,
        usable_hosts,
        kind,
    }
}
