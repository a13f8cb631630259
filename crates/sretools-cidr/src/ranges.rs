//! IP range membership
//!
//! Range tables are supplied by the caller in whatever order the source
//! publishes them. Lookups scan in that order and never re-sort, so with
//! overlapping ranges the first listed entry wins.

use crate::block::CidrBlock;
use serde::Serialize;
use sretools_core::Ipv4Address;

/// A CIDR block tagged with where it lives and what uses it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpRangeEntry {
    pub block: CidrBlock,
    pub region: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_border_group: Option<String>,
}

impl IpRangeEntry {
    pub fn new(block: CidrBlock, region: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            block,
            region: region.into(),
            service: service.into(),
            network_border_group: None,
        }
    }

    pub fn with_border_group(mut self, group: impl Into<String>) -> Self {
        self.network_border_group = Some(group.into());
        self
    }

    pub fn contains(&self, addr: Ipv4Address) -> bool {
        self.block.contains(addr)
    }
}

/// Unparsed range record as published by a range feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCandidate {
    /// Prefix text, IPv4 or otherwise
    pub prefix: String,
    pub region: String,
    pub service: String,
    pub network_border_group: Option<String>,
}

/// IPv4 entries built from a batch of candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRanges {
    pub entries: Vec<IpRangeEntry>,
    /// Candidates that were not IPv4 prefixes
    pub skipped: usize,
}

/// Convert candidate records into IPv4 range entries
///
/// Prefixes without a mask are read as `/32`. Anything that does not parse
/// as IPv4 (IPv6 prefixes in particular) is skipped and counted.
pub fn entries_from_candidates<I>(candidates: I) -> ParsedRanges
where
    I: IntoIterator<Item = RangeCandidate>,
{
    let mut parsed = ParsedRanges::default();

    for candidate in candidates {
        match CidrBlock::parse_or_host(candidate.prefix.trim()) {
            Ok(block) => parsed.entries.push(IpRangeEntry {
                block,
                region: candidate.region,
                service: candidate.service,
                network_border_group: candidate.network_border_group,
            }),
            Err(_) => parsed.skipped += 1,
        }
    }

    parsed
}

/// Find the first entry whose block contains `target`
///
/// # Examples
///
/// ```
/// use sretools_cidr::{find_containing_range, parse_cidr, IpRangeEntry};
///
/// let ranges = vec![IpRangeEntry::new(
///     parse_cidr("52.95.110.0/23").unwrap(),
///     "us-east-1",
///     "EC2",
/// )];
///
/// let hit = find_containing_range("52.95.110.1".parse().unwrap(), &ranges);
/// assert_eq!(hit.map(|e| e.region.as_str()), Some("us-east-1"));
///
/// assert!(find_containing_range("1.2.3.4".parse().unwrap(), &ranges).is_none());
/// ```
pub fn find_containing_range<'a, I>(target: Ipv4Address, entries: I) -> Option<&'a IpRangeEntry>
where
    I: IntoIterator<Item = &'a IpRangeEntry>,
{
    entries.into_iter().find(|entry| entry.contains(target))
}

/// Find every entry whose block contains `target`, in table order
pub fn find_all_containing<'a, I>(target: Ipv4Address, entries: I) -> Vec<&'a IpRangeEntry>
where
    I: IntoIterator<Item = &'a IpRangeEntry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.contains(target))
        .collect()
}
