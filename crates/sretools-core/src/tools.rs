//! Tool registry
//!
//! The catalogue of available tools, built once at startup and never mutated.
//! Each entry pairs an identifier with the command that renders it.

use serde::Serialize;

/// Which tool an entry renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    /// Check whether an IP belongs to a published AWS range
    AwsIpLookup,
    /// Derive network facts from CIDR notation
    CidrSubnetCalculator,
    /// Show the caller's public IP
    MyIpAddress,
}

/// A single catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// CLI subcommand that runs this tool
    pub command: &'static str,
    pub kind: ToolKind,
}

/// Immutable tool catalogue
///
/// # Examples
///
/// ```
/// use sretools_core::{ToolKind, ToolRegistry};
///
/// let registry = ToolRegistry::builtin();
/// let tool = registry.get("cidr-subnet-calculator").unwrap();
/// assert_eq!(tool.kind, ToolKind::CidrSubnetCalculator);
/// assert_eq!(tool.command, "subnet");
/// ```
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Build the registry of tools shipped with this binary, in display order
    pub fn builtin() -> Self {
        Self {
            tools: vec![
                Tool {
                    id: "aws-ip-lookup",
                    title: "AWS IP Lookup",
                    description: "Check if an IP address belongs to AWS and find its region and service.",
                    category: "Networking",
                    command: "aws-lookup",
                    kind: ToolKind::AwsIpLookup,
                },
                Tool {
                    id: "cidr-subnet-calculator",
                    title: "CIDR Subnet Calculator",
                    description: "Calculate network details from CIDR notation including network, broadcast, and usable IPs.",
                    category: "Networking",
                    command: "subnet",
                    kind: ToolKind::CidrSubnetCalculator,
                },
                Tool {
                    id: "my-ip-address",
                    title: "My IP Address",
                    description: "Show the public IP address this machine is seen from.",
                    category: "Networking",
                    command: "my-ip",
                    kind: ToolKind::MyIpAddress,
                },
            ],
        }
    }

    /// Look up a tool by id
    pub fn get(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Look up a tool by the CLI subcommand that runs it
    pub fn by_command(&self, command: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.command == command)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for tool in &self.tools {
            if !seen.contains(&tool.category) {
                seen.push(tool.category);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_unique() {
        let registry = ToolRegistry::builtin();
        let ids: HashSet<_> = registry.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), registry.len());

        let commands: HashSet<_> = registry.iter().map(|t| t.command).collect();
        assert_eq!(commands.len(), registry.len());
    }

    #[test]
    fn test_get_and_by_command() {
        let registry = ToolRegistry::builtin();
        assert_eq!(
            registry.get("aws-ip-lookup").map(|t| t.kind),
            Some(ToolKind::AwsIpLookup)
        );
        assert_eq!(
            registry.by_command("my-ip").map(|t| t.id),
            Some("my-ip-address")
        );
        assert!(registry.get("jwt-decoder").is_none());
    }

    #[test]
    fn test_display_order() {
        let registry = ToolRegistry::builtin();
        let ids: Vec<_> = registry.iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec!["aws-ip-lookup", "cidr-subnet-calculator", "my-ip-address"]
        );
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_categories() {
        assert_eq!(ToolRegistry::builtin().categories(), vec!["Networking"]);
    }

    #[test]
    fn test_tool_serialization() {
        let registry = ToolRegistry::builtin();
        let json = serde_json::to_string(registry.get("my-ip-address").unwrap()).unwrap();
        assert!(json.contains("\"kind\":\"my-ip-address\""));
        assert!(json.contains("\"command\":\"my-ip\""));
    }
}
