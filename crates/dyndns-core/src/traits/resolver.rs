// # Resolver Trait
//
// Defines the interface for discovering the host's current public address(es).
//
// ## Implementations
//
// - ipify echo services: `dyndns-ip-http` crate (`IpifyResolver`)
// - Orange Livebox router API: `dyndns-ip-http` crate (`LiveboxResolver`)
//
// ## Usage
//
// ```rust,ignore
// use dyndns_core::Resolver;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let resolver = /* Resolver implementation */;
//
//     let addresses = resolver.resolve().await?;
//     println!("v4={:?} v6={:?}", addresses.v4(), addresses.v6());
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family (v4 or v6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Family of the given address
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }

    /// Short label used in notifications ("v4" / "v6")
    pub fn label(self) -> &'static str {
        match self {
            IpVersion::V4 => "v4",
            IpVersion::V6 => "v6",
        }
    }
}

/// The public addresses discovered for this host
///
/// At least one family is always present. Single-stack and dual-stack
/// hosts are distinct variants so callers have to handle each case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedAddresses {
    /// IPv4-only host
    V4(Ipv4Addr),
    /// IPv6-only host
    V6(Ipv6Addr),
    /// Dual-stack host
    DualStack { v4: Ipv4Addr, v6: Ipv6Addr },
}

impl ResolvedAddresses {
    /// Build from optional per-family values
    ///
    /// Returns `None` when neither family is present.
    pub fn from_parts(v4: Option<Ipv4Addr>, v6: Option<Ipv6Addr>) -> Option<Self> {
        match (v4, v6) {
            (Some(v4), Some(v6)) => Some(Self::DualStack { v4, v6 }),
            (Some(v4), None) => Some(Self::V4(v4)),
            (None, Some(v6)) => Some(Self::V6(v6)),
            (None, None) => None,
        }
    }

    /// The IPv4 address, if the host has one
    pub fn v4(&self) -> Option<Ipv4Addr> {
        match self {
            Self::V4(v4) | Self::DualStack { v4, .. } => Some(*v4),
            Self::V6(_) => None,
        }
    }

    /// The IPv6 address, if the host has one
    pub fn v6(&self) -> Option<Ipv6Addr> {
        match self {
            Self::V6(v6) | Self::DualStack { v6, .. } => Some(*v6),
            Self::V4(_) => None,
        }
    }

    /// The resolved address for one family
    pub fn get(&self, version: IpVersion) -> Option<IpAddr> {
        match version {
            IpVersion::V4 => self.v4().map(IpAddr::V4),
            IpVersion::V6 => self.v6().map(IpAddr::V6),
        }
    }

    /// All resolved addresses, v4 first
    pub fn values(&self) -> Vec<IpAddr> {
        [IpVersion::V4, IpVersion::V6]
            .into_iter()
            .filter_map(|version| self.get(version))
            .collect()
    }

    /// Whether both families are present
    pub fn is_dual_stack(&self) -> bool {
        matches!(self, Self::DualStack { .. })
    }
}

impl fmt::Display for ResolvedAddresses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values().iter().map(IpAddr::to_string).collect();
        write!(f, "[{}]", values.join(" "))
    }
}

/// Trait for address resolver implementations
///
/// A resolver performs the lookups needed to learn the host's current
/// public address(es) and returns them in one [`ResolvedAddresses`].
///
/// Resolvers are selected once at startup and injected into the
/// [`Reconciler`](crate::Reconciler). They must not retry, cache results
/// between calls, or decide whether DNS needs updating.
///
/// # Errors
///
/// - [`Error::Network`](crate::Error::Network): transport failure or non-success status
/// - [`Error::Parse`](crate::Error::Parse): a response body is not an IP literal
/// - [`Error::Decode`](crate::Error::Decode): a structured response has the wrong shape
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Discover the current public address(es)
    async fn resolve(&self) -> Result<ResolvedAddresses, crate::Error>;

    /// Resolver name (for logging/debugging)
    fn resolver_name(&self) -> &'static str;
}

/// Helper trait for constructing resolvers from configuration
pub trait ResolverFactory: Send + Sync {
    /// Create a Resolver instance from configuration
    fn create(
        &self,
        config: &crate::config::ResolverConfig,
        http: &crate::config::HttpConfig,
    ) -> Result<Box<dyn Resolver>, crate::Error>;
}
