use thiserror::Error;

/// Validation errors for address and CIDR input
///
/// Every variant is a recoverable rejection of user input. The `Display`
/// output is meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Address does not split into exactly four dot-separated parts
    #[error("Expected 4 dot-separated octets, found {0}")]
    WrongSegmentCount(usize),

    /// A segment is not an integer in [0, 255]
    #[error("Invalid octet '{0}': each octet must be between 0 and 255")]
    InvalidOctet(String),

    /// CIDR text lacks the `address/prefix` shape
    #[error("Invalid CIDR format: {0}. Use format: 192.168.1.0/24")]
    InvalidFormat(String),

    /// Prefix is numeric but outside [0, 32]
    #[error("Invalid prefix length '{0}': must be between 0 and 32")]
    InvalidPrefixLength(String),
}

impl ParseError {
    /// Stable machine-readable tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::WrongSegmentCount(_) => "wrong_segment_count",
            ParseError::InvalidOctet(_) => "invalid_octet",
            ParseError::InvalidFormat(_) => "invalid_format",
            ParseError::InvalidPrefixLength(_) => "invalid_prefix_length",
        }
    }
}

/// Result type alias for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
