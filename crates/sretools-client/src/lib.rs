//! HTTP client for the public endpoints used by SRE Tools
//!
//! Provides an async HTTP client with:
//! - Connection pooling
//! - Automatic retries with exponential backoff
//! - Rate limiting
//! - Timeout configuration
//!
//! Two read-only JSON endpoints are supported: the AWS IP range feed and
//! ipify's public IP echo.
//!
//! # Examples
//!
//! ```no_run
//! use sretools_client::ToolsClient;
//! use sretools_core::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ToolsClient::new(&Config::default())?;
//! let ip = client.fetch_public_ip().await?;
//! println!("Public IP: {}", ip);
//! # Ok(())
//! # }
//! ```

mod aws;

pub use aws::{AwsIpv4Prefix, AwsIpv6Prefix, IpRangesDocument};

use governor::{Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use sretools_core::{parse_address, Config, Ipv4Address};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const REQUESTS_PER_SECOND: u32 = 10;
const INITIAL_BACKOFF: Duration = Duration::from_millis(100);

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// Endpoint answered with a non-success status
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {0}s")]
    RateLimited(u64),
}

impl ApiError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RequestFailed(_) => true,
            ApiError::Status(code) => *code >= 500,
            ApiError::InvalidResponse(_) | ApiError::RateLimited(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

type DirectRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

/// HTTP client for the AWS range feed and ipify
pub struct ToolsClient {
    client: Client,
    aws_ranges_url: String,
    ipify_url: String,
    max_retries: u32,
    rate_limiter: Arc<DirectRateLimiter>,
}

impl ToolsClient {
    /// Create a new client from configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use sretools_client::ToolsClient;
    /// use sretools_core::Config;
    ///
    /// let client = ToolsClient::new(&Config::default()).unwrap();
    /// ```
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let per_second = NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            client,
            aws_ranges_url: config.aws_ranges_url.clone(),
            ipify_url: config.ipify_url.clone(),
            max_retries: config.max_retries,
            rate_limiter,
        })
    }

    /// Download and parse the AWS IP range document
    pub async fn fetch_aws_ranges(&self) -> Result<IpRangesDocument> {
        let body = self.get_with_retry(&self.aws_ranges_url).await?;
        let document = IpRangesDocument::from_json(&body)?;
        tracing::debug!(
            prefixes = document.prefixes.len(),
            ipv6_prefixes = document.ipv6_prefixes.len(),
            create_date = %document.create_date,
            "fetched AWS ip ranges"
        );
        Ok(document)
    }

    /// Ask ipify for the public IPv4 address of this machine
    pub async fn fetch_public_ip(&self) -> Result<Ipv4Address> {
        let body = self.get_with_retry(&self.ipify_url).await?;
        parse_public_ip(&body)
    }

    async fn get_with_retry(&self, url: &str) -> Result<String> {
        let mut retries = 0;
        let mut backoff = INITIAL_BACKOFF;

        loop {
            // Every attempt, retries included, goes through the limiter
            self.rate_limiter.until_ready().await;

            match self.make_request(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && retries < self.max_retries => {
                    retries += 1;
                    tracing::warn!(url, attempt = retries, error = %e, "request failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn make_request(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ApiError::RateLimited(retry_after));
        }

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))
    }
}

fn parse_public_ip(body: &str) -> Result<Ipv4Address> {
    let response: IpifyResponse =
        serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
    parse_address(response.ip.trim())
        .map_err(|e| ApiError::InvalidResponse(format!("'{}': {}", response.ip, e)))
}
