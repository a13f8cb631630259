//! CIDR operations and IP range queries
//!
//! Provides the IPv4 arithmetic behind the subnet calculator and the AWS IP
//! lookup:
//! - Parse CIDR notation (e.g., "192.168.0.0/24")
//! - Derive network, broadcast, mask and usable host range
//! - Find the first range in a table that contains an address
//!
//! Everything here is pure and synchronous. Fetching range tables is the job
//! of `sretools-client`.
//!
//! # Examples
//!
//! ```
//! use sretools_cidr::{compute_subnet, parse_cidr};
//!
//! let block = parse_cidr("10.0.16.0/22").unwrap();
//! let info = compute_subnet(&block);
//! assert_eq!(info.network.to_string(), "10.0.16.0");
//! assert_eq!(info.broadcast.to_string(), "10.0.19.255");
//! assert_eq!(info.usable_hosts, 1022);
//! ```

mod block;
mod ranges;
mod subnet;

pub use block::{mask_for, parse_cidr, CidrBlock};
pub use ranges::{
    entries_from_candidates, find_all_containing, find_containing_range, IpRangeEntry,
    ParsedRanges, RangeCandidate,
};
pub use subnet::{compute_subnet, SubnetInfo, SubnetKind};

pub use sretools_core::{Ipv4Address, ParseError, Result};
