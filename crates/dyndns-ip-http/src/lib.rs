// # HTTP Resolvers
//
// This crate provides the HTTP-based address resolvers for dyndns.
//
// ## Resolvers
//
// - **ipify**: asks public echo services which address the request came
//   from. The dual-stack endpoint is queried first; only when it answers
//   with IPv6 is the IPv4-only endpoint queried as well.
// - **livebox**: asks an Orange Livebox router for its WAN addresses, for
//   hosts behind that router that cannot reach the echo services.
//
// Both perform a single attempt per request. Retrying is left to whatever
// schedules the next run.

mod ipify;
mod livebox;

pub use ipify::IpifyResolver;
pub use livebox::LiveboxResolver;

use dyndns_core::ComponentRegistry;
use dyndns_core::config::{HttpConfig, ResolverConfig};
use dyndns_core::traits::{Resolver, ResolverFactory};
use dyndns_core::{Error, Result};

/// Shared client builder: one timeout for every request
fn build_client(http: &HttpConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(http.timeout())
        .build()
        .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))
}

/// Factory for creating ipify resolvers
pub struct IpifyFactory;

impl ResolverFactory for IpifyFactory {
    fn create(&self, config: &ResolverConfig, http: &HttpConfig) -> Result<Box<dyn Resolver>> {
        match config {
            ResolverConfig::Ipify {
                dual_stack_url,
                ipv4_url,
            } => Ok(Box::new(IpifyResolver::new(
                dual_stack_url.clone(),
                ipv4_url.clone(),
                http,
            )?)),
            _ => Err(Error::config("Invalid config for ipify resolver")),
        }
    }
}

/// Factory for creating Livebox resolvers
pub struct LiveboxFactory;

impl ResolverFactory for LiveboxFactory {
    fn create(&self, config: &ResolverConfig, http: &HttpConfig) -> Result<Box<dyn Resolver>> {
        match config {
            ResolverConfig::Livebox { url } => {
                Ok(Box::new(LiveboxResolver::new(url.clone(), http)?))
            }
            _ => Err(Error::config("Invalid config for Livebox resolver")),
        }
    }
}

/// Register both resolvers with a registry
pub fn register(registry: &mut ComponentRegistry) {
    registry.register_resolver("ipify", Box::new(IpifyFactory));
    registry.register_resolver("livebox", Box::new(LiveboxFactory));
}
