//! Endpoint and HTTP configuration
//!
//! Settings come from environment variables on top of built-in defaults.
//! Command-line flags are applied by the binary after loading.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Published AWS IP range document
pub const DEFAULT_AWS_RANGES_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";

/// ipify public IP endpoint
pub const DEFAULT_IPIFY_URL: &str = "https://api.ipify.org?format=json";

pub const ENV_AWS_RANGES_URL: &str = "SRETOOLS_AWS_RANGES_URL";
pub const ENV_IPIFY_URL: &str = "SRETOOLS_IPIFY_URL";
pub const ENV_TIMEOUT_SECS: &str = "SRETOOLS_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "SRETOOLS_MAX_RETRIES";

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable holds a value that cannot be used
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL of the AWS `ip-ranges.json` document
    pub aws_ranges_url: String,
    /// URL of the ipify JSON endpoint
    pub ipify_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_ranges_url: DEFAULT_AWS_RANGES_URL.to_string(),
            ipify_url: DEFAULT_IPIFY_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            user_agent: format!("sretools/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Reads `SRETOOLS_AWS_RANGES_URL`, `SRETOOLS_IPIFY_URL`,
    /// `SRETOOLS_TIMEOUT_SECS` and `SRETOOLS_MAX_RETRIES`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_AWS_RANGES_URL).filter(|v| !v.is_empty()) {
            config.aws_ranges_url = url;
        }
        if let Some(url) = lookup(ENV_IPIFY_URL).filter(|v| !v.is_empty()) {
            config.ipify_url = url;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs = parse_number::<u64>(ENV_TIMEOUT_SECS, &value)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: ENV_TIMEOUT_SECS,
                    value,
                });
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(value) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &value)?;
        }

        Ok(config)
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}
