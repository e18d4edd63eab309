// # Gandi LiveDNS Provider
//
// This crate provides the Gandi LiveDNS record client for dyndns.
//
// ## Behavior
//
// - One HTTP request per call; no retry, no backoff, no caching
// - Writes are full replacements: every family not included in a PUT is
//   dropped by Gandi
// - Any status >= 400 is returned as an API error carrying the raw body
//
// ## Security Requirements
//
// - API key NEVER appears in logs or Debug output
// - Provider fails fast if the key is empty
//
// ## API Reference
//
// - LiveDNS v5: https://api.gandi.net/docs/livedns/
// - Read record set: GET `/v5/livedns/domains/:fqdn/records/:rrset_name`
// - Replace record set: PUT `/v5/livedns/domains/:fqdn/records/:rrset_name`
// - Delete one type: DELETE `/v5/livedns/domains/:fqdn/records/:rrset_name/:rrset_type`

use async_trait::async_trait;
use dyndns_core::config::{HttpConfig, ProviderConfig};
use dyndns_core::traits::{
    DnsProvider, DnsProviderFactory, DnsRecordEntry, DnsRecordSet, RecordType,
};
use dyndns_core::{ComponentRegistry, Error, Result};
use serde::Serialize;
use std::net::IpAddr;

/// Web admin page listing a domain's records
const GANDI_ADMIN_BASE: &str = "https://admin.gandi.net/domain";

/// PUT body for a full record-set replacement
#[derive(Debug, Serialize)]
struct RecordItems<'a> {
    items: &'a [DnsRecordEntry],
}

/// Gandi LiveDNS provider
///
/// # Security
///
/// The Debug implementation does NOT expose the API key.
pub struct GandiProvider {
    /// Gandi API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// API root, e.g. "https://api.gandi.net"
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for GandiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GandiProvider")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GandiProvider {
    /// Create a new Gandi provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: Gandi API key with LiveDNS rights
    /// - `base_url`: API root; tests point this at a mock server
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the key is empty.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        http: &HttpConfig,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("Gandi API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(http.timeout())
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn records_url(&self, domain: &str, record: &str) -> String {
        format!(
            "{}/v5/livedns/domains/{}/records/{}",
            self.base_url, domain, record
        )
    }

    fn authorization(&self) -> String {
        format!("Apikey {}", self.api_key)
    }

    /// Delete the entries of one type from a record set
    ///
    /// # API Call
    ///
    /// ```http
    /// DELETE /v5/livedns/domains/example.com/records/home/AAAA
    /// Authorization: Apikey <key>
    /// ```
    pub async fn delete_records(
        &self,
        domain: &str,
        record: &str,
        record_type: RecordType,
    ) -> Result<()> {
        let url = format!("{}/{}", self.records_url(domain, record), record_type);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {}", e)))?;

        check_status(response).await?;
        tracing::info!("Deleted {} entries of {}.{}", record_type, record, domain);
        Ok(())
    }
}

/// Map a status >= 400 to an API error carrying the raw body
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    Err(Error::api(status.as_u16(), body))
}

#[async_trait]
impl DnsProvider for GandiProvider {
    /// Read the record set
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /v5/livedns/domains/example.com/records/home
    /// Authorization: Apikey <key>
    /// ```
    async fn get_records(&self, domain: &str, record: &str) -> Result<DnsRecordSet> {
        let url = self.records_url(domain, record);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {}", e)))?;

        let response = check_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("Unexpected record set from Gandi: {}", e)))
    }

    /// Replace the record set with one single-value entry per address
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /v5/livedns/domains/example.com/records/home
    /// Authorization: Apikey <key>
    ///
    /// {"items": [{"rrset_type": "A", "rrset_ttl": 3600, "rrset_values": ["203.0.113.5"]}]}
    /// ```
    async fn put_records(
        &self,
        domain: &str,
        record: &str,
        addresses: &[IpAddr],
        ttl: u32,
    ) -> Result<()> {
        let url = self.records_url(domain, record);
        let items = addresses
            .iter()
            .map(|ip| DnsRecordEntry::for_ip(*ip, ttl))
            .collect::<Vec<_>>();
        let payload = serde_json::to_vec(&RecordItems { items: &items })?;
        tracing::debug!("PUT {} with {} entries", url, items.len());

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {}", e)))?;

        check_status(response).await?;
        tracing::info!("Record set {}.{} replaced", record, domain);
        Ok(())
    }

    fn records_admin_url(&self, domain: &str) -> String {
        format!("{}/{}/records", GANDI_ADMIN_BASE, domain)
    }

    fn provider_name(&self) -> &'static str {
        "gandi"
    }
}

/// Factory for creating Gandi providers
pub struct GandiFactory;

impl DnsProviderFactory for GandiFactory {
    fn create(&self, config: &ProviderConfig, http: &HttpConfig) -> Result<Box<dyn DnsProvider>> {
        match config {
            ProviderConfig::Gandi { api_key, base_url } => {
                Ok(Box::new(GandiProvider::new(api_key.clone(), base_url.clone(), http)?))
            }
        }
    }
}

/// Register the Gandi provider with a registry
///
/// # Example
///
/// ```rust
/// use dyndns_core::ComponentRegistry;
///
/// let mut registry = ComponentRegistry::new();
/// dyndns_provider_gandi::register(&mut registry);
/// assert!(registry.has_provider("gandi"));
/// ```
pub fn register(registry: &mut ComponentRegistry) {
    registry.register_provider("gandi", Box::new(GandiFactory));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creation() {
        let provider = GandiFactory.create(&ProviderConfig::gandi("test_key"), &HttpConfig::default());
        assert!(provider.is_ok());
    }

    #[test]
    fn test_factory_missing_key() {
        let provider = GandiFactory.create(&ProviderConfig::gandi(""), &HttpConfig::default());
        assert!(matches!(provider, Err(Error::Config(_))));
    }

    #[test]
    fn test_records_url() {
        let provider =
            GandiProvider::new("key", "https://api.gandi.net/", &HttpConfig::default()).unwrap();
        assert_eq!(
            provider.records_url("example.com", "home"),
            "https://api.gandi.net/v5/livedns/domains/example.com/records/home"
        );
    }

    #[test]
    fn test_admin_url() {
        let provider =
            GandiProvider::new("key", "https://api.gandi.net", &HttpConfig::default()).unwrap();
        assert_eq!(
            provider.records_admin_url("example.com"),
            "https://admin.gandi.net/domain/example.com/records"
        );
    }

    #[test]
    fn test_put_payload_shape() {
        let items = vec![
            DnsRecordEntry::for_ip("203.0.113.5".parse().unwrap(), 3600),
            DnsRecordEntry::for_ip("2001:db8::1".parse().unwrap(), 3600),
        ];
        let value = serde_json::to_value(RecordItems { items: &items }).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"items": [
                {"rrset_type": "A", "rrset_ttl": 3600, "rrset_values": ["203.0.113.5"]},
                {"rrset_type": "AAAA", "rrset_ttl": 3600, "rrset_values": ["2001:db8::1"]}
            ]})
        );
    }

    #[test]
    fn test_api_key_not_exposed_in_debug() {
        let provider =
            GandiProvider::new("secret_key_12345", "https://api.gandi.net", &HttpConfig::default())
                .unwrap();

        let debug_str = format!("{:?}", provider);
        assert!(!debug_str.contains("secret_key"));
        assert!(debug_str.contains("GandiProvider"));
    }
}
