//! Core types for SRE Tools
//!
//! This crate provides the foundational types shared by every SRE Tools crate:
//! - [`Ipv4Address`] - IPv4 address in the unsigned 32-bit domain
//! - [`ParseError`] - Validation errors for address and CIDR input
//! - [`ToolRegistry`] - Immutable catalogue of the available tools
//! - [`Config`] - Endpoint and HTTP settings
//!
//! ```
//! use sretools_core::{parse_address, Ipv4Address};
//!
//! let addr = parse_address("192.168.1.10").unwrap();
//! assert_eq!(addr, Ipv4Address(0xC0A8010A));
//! assert_eq!(addr.to_string(), "192.168.1.10");
//! ```

mod address;
pub mod config;
mod error;
pub mod tools;

pub use address::{format_address, parse_address, Ipv4Address};
pub use config::{Config, ConfigError};
pub use error::{ParseError, Result};
pub use tools::{Tool, ToolKind, ToolRegistry};
