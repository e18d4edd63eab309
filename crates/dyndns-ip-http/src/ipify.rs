//! ipify echo-service resolver

use async_trait::async_trait;
use dyndns_core::config::HttpConfig;
use dyndns_core::traits::{ResolvedAddresses, Resolver};
use dyndns_core::{Error, Result};
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// Resolves public addresses through the ipify echo services
pub struct IpifyResolver {
    /// Endpoint reachable over IPv4 and IPv6, queried first
    dual_stack_url: String,

    /// IPv4-only endpoint
    ipv4_url: String,

    client: reqwest::Client,
}

impl IpifyResolver {
    /// Create a resolver for the given endpoints
    ///
    /// # Parameters
    ///
    /// - `dual_stack_url`: e.g. "https://api64.ipify.org"
    /// - `ipv4_url`: e.g. "https://api.ipify.org"
    ///
    /// # Errors
    ///
    /// [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(dual_stack_url: String, ipv4_url: String, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            dual_stack_url,
            ipv4_url,
            client: super::build_client(http)?,
        })
    }

    /// Fetch one echo endpoint and parse its trimmed body
    async fn fetch_ip(&self, url: &str) -> Result<IpAddr> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!("{} answered with HTTP {}", url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response from {}: {}", url, e)))?;

        let text = body.trim();
        debug!("{} answered '{}'", url, text);

        text.parse::<IpAddr>()
            .map(|ip| ip.to_canonical())
            .map_err(|_| Error::parse(format!("'{}' from {} is not an IP address", text, url)))
    }

    async fn fetch_ipv4(&self) -> Result<Ipv4Addr> {
        match self.fetch_ip(&self.ipv4_url).await? {
            IpAddr::V4(v4) => Ok(v4),
            IpAddr::V6(v6) => Err(Error::parse(format!(
                "expected an IPv4 address from {}, got {}",
                self.ipv4_url, v6
            ))),
        }
    }
}

#[async_trait]
impl Resolver for IpifyResolver {
    async fn resolve(&self) -> Result<ResolvedAddresses> {
        match self.fetch_ip(&self.dual_stack_url).await? {
            // Reached over IPv4: the host has no usable IPv6 route
            IpAddr::V4(v4) => Ok(ResolvedAddresses::V4(v4)),
            IpAddr::V6(v6) => {
                let v4 = self.fetch_ipv4().await?;
                Ok(ResolvedAddresses::DualStack { v4, v6 })
            }
        }
    }

    fn resolver_name(&self) -> &'static str {
        "ipify"
    }
}
