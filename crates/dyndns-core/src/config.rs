//! Configuration types for dyndns
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

/// Default record TTL in seconds
pub const DEFAULT_TTL: u32 = 3600;

/// Smallest TTL Gandi LiveDNS accepts
pub const MIN_TTL: u32 = 300;

/// Largest TTL Gandi LiveDNS accepts (30 days)
pub const MAX_TTL: u32 = 2_592_000;

/// Default timeout for every outbound HTTP call
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

/// Parameters of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Domain holding the record (e.g., "example.com")
    pub domain: String,

    /// Record name relative to the domain (e.g., "www" or "*.pi")
    pub record: String,

    /// TTL written with updated entries
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Post an info notification even when nothing changed
    #[serde(default)]
    pub always_notify: bool,
}

impl RunConfig {
    /// Create a run configuration with the default TTL
    pub fn new(domain: impl Into<String>, record: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            record: record.into(),
            ttl: DEFAULT_TTL,
            always_notify: false,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Enable or disable notifications for no-op runs
    pub fn with_always_notify(mut self, always_notify: bool) -> Self {
        self.always_notify = always_notify;
        self
    }

    /// Fully qualified name of the managed record
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.record, self.domain)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        validate_domain_name(&self.domain)?;

        if self.record.trim().is_empty() {
            return Err(crate::Error::config("Record name cannot be empty"));
        }
        if self.record.chars().any(char::is_whitespace) {
            return Err(crate::Error::config(format!(
                "Record name cannot contain whitespace: '{}'",
                self.record
            )));
        }
        // The record name is a single URL path segment at the provider
        if let Some(c) = self.record.chars().find(|c| matches!(c, '/' | '?' | '#' | '%')) {
            return Err(crate::Error::config(format!(
                "Record name cannot contain '{}': '{}'",
                c, self.record
            )));
        }

        if !(MIN_TTL..=MAX_TTL).contains(&self.ttl) {
            return Err(crate::Error::config(format!(
                "TTL must be between {} and {} seconds. Got: {}",
                MIN_TTL, MAX_TTL, self.ttl
            )));
        }

        Ok(())
    }
}

/// Validate that a string is a valid domain name
///
/// Basic RFC 1035 checks; not comprehensive but catches common errors.
fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    if domain.is_empty() {
        return Err(crate::Error::config("Domain name cannot be empty"));
    }

    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(crate::Error::config(format!(
                "Domain label contains invalid characters. Label: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// Shared HTTP transport settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout applied to every request, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Timeout as a `Duration`
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

/// Address resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolverConfig {
    /// ipify echo services
    Ipify {
        /// Dual-stack echo endpoint, queried first
        dual_stack_url: String,
        /// IPv4-only echo endpoint, queried when the first answer is IPv6
        ipv4_url: String,
    },

    /// Orange Livebox router API
    Livebox {
        /// Router web-service endpoint
        url: String,
    },
}

impl ResolverConfig {
    /// ipify with its public endpoints
    pub fn ipify() -> Self {
        ResolverConfig::Ipify {
            dual_stack_url: "https://api64.ipify.org".to_string(),
            ipv4_url: "https://api.ipify.org".to_string(),
        }
    }

    /// Livebox at its default LAN address
    pub fn livebox() -> Self {
        ResolverConfig::Livebox {
            url: "http://192.168.1.1/ws".to_string(),
        }
    }

    /// Validate the resolver configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ResolverConfig::Ipify {
                dual_stack_url,
                ipv4_url,
            } => {
                validate_url("ipify dual-stack URL", dual_stack_url)?;
                validate_url("ipify IPv4 URL", ipv4_url)
            }
            ResolverConfig::Livebox { url } => validate_url("Livebox URL", url),
        }
    }

    /// Get the resolver type name
    pub fn type_name(&self) -> &str {
        match self {
            ResolverConfig::Ipify { .. } => "ipify",
            ResolverConfig::Livebox { .. } => "livebox",
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::ipify()
    }
}

/// DNS provider configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Gandi LiveDNS
    Gandi {
        /// Gandi API key
        api_key: String,
        /// API root (e.g., "https://api.gandi.net")
        #[serde(default = "default_gandi_base_url")]
        base_url: String,
    },
}

impl ProviderConfig {
    /// Gandi against the public API
    pub fn gandi(api_key: impl Into<String>) -> Self {
        ProviderConfig::Gandi {
            api_key: api_key.into(),
            base_url: default_gandi_base_url(),
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Gandi { api_key, base_url } => {
                if api_key.is_empty() {
                    return Err(crate::Error::config("Gandi API key cannot be empty"));
                }
                validate_url("Gandi base URL", base_url)
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Gandi { .. } => "gandi",
        }
    }
}

// Hides the API key
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gandi { base_url, .. } => f
                .debug_struct("Gandi")
                .field("api_key", &"<REDACTED>")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

fn default_gandi_base_url() -> String {
    "https://api.gandi.net".to_string()
}

/// Notification channel configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifierConfig {
    /// Discord webhook
    Discord {
        /// Full webhook URL (contains its secret token)
        webhook_url: String,
        /// Name shown as the message author
        #[serde(default)]
        username: Option<String>,
    },
}

impl NotifierConfig {
    /// Discord webhook with the default username
    pub fn discord(webhook_url: impl Into<String>) -> Self {
        NotifierConfig::Discord {
            webhook_url: webhook_url.into(),
            username: None,
        }
    }

    /// Validate the notifier configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            NotifierConfig::Discord { webhook_url, .. } => {
                validate_url("Discord webhook URL", webhook_url)
            }
        }
    }

    /// Get the notifier type name
    pub fn type_name(&self) -> &str {
        match self {
            NotifierConfig::Discord { .. } => "discord",
        }
    }
}

// Hides the webhook token
impl std::fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifierConfig::Discord { username, .. } => f
                .debug_struct("Discord")
                .field("webhook_url", &"<REDACTED>")
                .field("username", username)
                .finish(),
        }
    }
}

fn validate_url(what: &str, url: &str) -> Result<(), crate::Error> {
    if url.is_empty() {
        return Err(crate::Error::config(format!("{} cannot be empty", what)));
    }
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(crate::Error::config(format!(
            "{} must use HTTP or HTTPS scheme. Got: {}",
            what, url
        )));
    }
    Ok(())
}
