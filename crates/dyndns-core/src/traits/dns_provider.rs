// # DNS Provider Trait
//
// Defines the interface for reading and writing the record set of one name
// at a DNS provider.
//
// ## Implementations
//
// - Gandi LiveDNS: `dyndns-provider-gandi` crate
//
// ## Usage
//
// ```rust,ignore
// use dyndns_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let records = provider.get_records("example.com", "www").await?;
//     provider
//         .put_records("example.com", "www", &[std::net::IpAddr::from([203, 0, 113, 5])], 3600)
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

use super::resolver::IpVersion;

/// DNS record type handled by dyndns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address record
    #[serde(rename = "A")]
    A,
    /// IPv6 address record
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Record type matching the family of an address
    pub fn for_ip(ip: &IpAddr) -> Self {
        match IpVersion::of(ip) {
            IpVersion::V4 => RecordType::A,
            IpVersion::V6 => RecordType::Aaaa,
        }
    }

    /// Wire name of the type
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed entry of a record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordEntry {
    /// Record type ("A" or "AAAA")
    pub rrset_type: RecordType,

    /// Time-to-live in seconds
    pub rrset_ttl: u32,

    /// Record name, relative to the domain. Empty in write payloads.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rrset_name: String,

    /// Provider link to this entry, if it returned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrset_href: Option<String>,

    /// Addresses stored in this entry
    pub rrset_values: Vec<IpAddr>,
}

impl DnsRecordEntry {
    /// Entry carrying a single address, typed from its family
    pub fn for_ip(ip: IpAddr, ttl: u32) -> Self {
        Self {
            rrset_type: RecordType::for_ip(&ip),
            rrset_ttl: ttl,
            rrset_name: String::new(),
            rrset_href: None,
            rrset_values: vec![ip],
        }
    }
}

/// The provider's current view of a named record
///
/// Entries keep the order the provider returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DnsRecordSet(Vec<DnsRecordEntry>);

impl DnsRecordSet {
    /// Wrap a list of entries
    pub fn new(entries: Vec<DnsRecordEntry>) -> Self {
        Self(entries)
    }

    /// Entries in provider order
    pub fn entries(&self) -> &[DnsRecordEntry] {
        &self.0
    }

    /// Every stored value, entry by entry, in provider order
    pub fn values(&self) -> impl Iterator<Item = &IpAddr> {
        self.0.iter().flat_map(|entry| entry.rrset_values.iter())
    }

    /// Whether the set holds no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<DnsRecordEntry>> for DnsRecordSet {
    fn from(entries: Vec<DnsRecordEntry>) -> Self {
        Self(entries)
    }
}

/// Trait for DNS provider implementations
///
/// Providers are stateless API clients. Each method performs exactly one
/// authenticated HTTP request and reports the outcome; retries, caching
/// and the decision to write belong to the [`Reconciler`](crate::Reconciler).
///
/// # Full-replace writes
///
/// [`DnsProvider::put_records`] replaces the whole record set for the name.
/// Any family missing from `addresses` is dropped by the provider, so the
/// caller must pass every address that should remain.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Fetch the current record set for `record` under `domain`
    ///
    /// # Errors
    ///
    /// - [`Error::Network`](crate::Error::Network): transport failure
    /// - [`Error::Api`](crate::Error::Api): status >= 400, with status and raw body
    /// - [`Error::Decode`](crate::Error::Decode): body is not a record set
    async fn get_records(&self, domain: &str, record: &str) -> Result<DnsRecordSet, crate::Error>;

    /// Replace the record set with one entry per address
    ///
    /// # Errors
    ///
    /// - [`Error::Network`](crate::Error::Network): transport failure
    /// - [`Error::Api`](crate::Error::Api): status >= 400, with status and raw body
    async fn put_records(
        &self,
        domain: &str,
        record: &str,
        addresses: &[IpAddr],
        ttl: u32,
    ) -> Result<(), crate::Error>;

    /// Human-facing page where the domain's records can be managed
    fn records_admin_url(&self, domain: &str) -> String;

    /// Provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
        http: &crate::config::HttpConfig,
    ) -> Result<Box<dyn DnsProvider>, crate::Error>;
}
