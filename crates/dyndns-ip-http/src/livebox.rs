//! Orange Livebox router resolver
//!
//! The router exposes a JSON-RPC style web service on the LAN. The
//! `NMC.getWANStatus` call returns the WAN addresses without
//! authentication.

use async_trait::async_trait;
use dyndns_core::config::HttpConfig;
use dyndns_core::traits::{ResolvedAddresses, Resolver};
use dyndns_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use tracing::debug;

/// Content type the router requires for web-service calls
const SAH_CONTENT_TYPE: &str = "application/x-sah-ws-1-call+json";

#[derive(Debug, Serialize)]
struct WsCall<'a> {
    service: &'a str,
    method: &'a str,
    parameters: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WanStatusResponse {
    result: WanStatusResult,
}

#[derive(Debug, Deserialize)]
struct WanStatusResult {
    data: WanStatus,
}

#[derive(Debug, Deserialize)]
struct WanStatus {
    #[serde(rename = "IPAddress", default)]
    ip_address: String,

    #[serde(rename = "IPv6Address", default)]
    ipv6_address: String,
}

/// Resolves public addresses from a Livebox router's WAN status
pub struct LiveboxResolver {
    /// Router web-service endpoint, e.g. "http://192.168.1.1/ws"
    url: String,

    client: reqwest::Client,
}

impl LiveboxResolver {
    pub fn new(url: String, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            url,
            client: super::build_client(http)?,
        })
    }

    async fn wan_status(&self) -> Result<WanStatus> {
        let call = WsCall {
            service: "NMC",
            method: "getWANStatus",
            parameters: serde_json::Map::new(),
        };
        let payload = serde_json::to_vec(&call)?;

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, SAH_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "{} answered with HTTP {}",
                self.url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;
        debug!("WAN status: {}", body);

        let parsed: WanStatusResponse = serde_json::from_str(&body)?;
        Ok(parsed.result.data)
    }
}

/// Empty strings mean the router has no address of that family
fn parse_optional<T: FromStr>(value: &str, family: &str) -> Result<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| Error::parse(format!("'{}' is not an {} address", value, family)))
}

#[async_trait]
impl Resolver for LiveboxResolver {
    async fn resolve(&self) -> Result<ResolvedAddresses> {
        let status = self.wan_status().await?;

        let v4 = parse_optional::<Ipv4Addr>(&status.ip_address, "IPv4")?;
        let v6 = parse_optional::<Ipv6Addr>(&status.ipv6_address, "IPv6")?;

        ResolvedAddresses::from_parts(v4, v6)
            .ok_or_else(|| Error::decode("Livebox WAN status carries no address"))
    }

    fn resolver_name(&self) -> &'static str {
        "livebox"
    }
}
