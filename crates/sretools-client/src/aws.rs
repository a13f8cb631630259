//! AWS `ip-ranges.json` document model
//!
//! Field names follow the published feed. IPv6 prefixes are kept in the
//! model but dropped when building the IPv4 range table.

use crate::{ApiError, Result};
use serde::{Deserialize, Serialize};
use sretools_cidr::{entries_from_candidates, ParsedRanges, RangeCandidate};

/// Parsed AWS IP range document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IpRangesDocument {
    #[serde(rename = "syncToken", default)]
    pub sync_token: String,
    #[serde(rename = "createDate", default)]
    pub create_date: String,
    #[serde(default)]
    pub prefixes: Vec<AwsIpv4Prefix>,
    #[serde(default)]
    pub ipv6_prefixes: Vec<AwsIpv6Prefix>,
}

/// Entry of the `prefixes` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AwsIpv4Prefix {
    #[serde(default)]
    pub ip_prefix: Option<String>,
    pub region: String,
    pub service: String,
    #[serde(default)]
    pub network_border_group: Option<String>,
}

/// Entry of the `ipv6_prefixes` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AwsIpv6Prefix {
    pub ipv6_prefix: String,
    pub region: String,
    pub service: String,
    #[serde(default)]
    pub network_border_group: Option<String>,
}

impl IpRangesDocument {
    /// Parse the JSON text of the feed
    ///
    /// # Examples
    ///
    /// ```
    /// use sretools_client::IpRangesDocument;
    ///
    /// let doc = IpRangesDocument::from_json(
    ///     r#"{"syncToken":"1","createDate":"2024-01-01-00-00-00",
    ///        "prefixes":[{"ip_prefix":"52.95.110.0/23","region":"us-east-1","service":"EC2"}],
    ///        "ipv6_prefixes":[]}"#,
    /// ).unwrap();
    /// assert_eq!(doc.prefixes.len(), 1);
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Build the IPv4 range table in document order
    ///
    /// IPv4 prefixes come first, then IPv6 ones; the latter are counted in
    /// `skipped` along with records missing a prefix.
    pub fn to_entries(&self) -> ParsedRanges {
        let ipv4 = self.prefixes.iter().map(|p| RangeCandidate {
            prefix: p.ip_prefix.clone().unwrap_or_default(),
            region: p.region.clone(),
            service: p.service.clone(),
            network_border_group: p.network_border_group.clone(),
        });
        let ipv6 = self.ipv6_prefixes.iter().map(|p| RangeCandidate {
            prefix: p.ipv6_prefix.clone(),
            region: p.region.clone(),
            service: p.service.clone(),
            network_border_group: p.network_border_group.clone(),
        });

        let parsed = entries_from_candidates(ipv4.chain(ipv6));
        tracing::debug!(
            entries = parsed.entries.len(),
            skipped = parsed.skipped,
            sync_token = %self.sync_token,
            "built AWS range table"
        );
        parsed
    }
}
