//! Plugin-based component registry
//!
//! The registry lets resolvers, DNS providers and notifiers be registered
//! by name at startup, so the binary picks implementations from
//! configuration instead of hard-coded if-else chains.
//!
//! ## Registration
//!
//! Implementation crates expose a `register()` function:
//!
//! ```rust,ignore
//! // In dyndns-provider-gandi
//! pub fn register(registry: &mut ComponentRegistry) {
//!     registry.register_provider("gandi", Box::new(GandiFactory));
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = ComponentRegistry::new();
//! dyndns_provider_gandi::register(&mut registry);
//!
//! let provider = registry.create_provider(&ProviderConfig::gandi(token), &HttpConfig::default())?;
//! ```

use crate::config::{HttpConfig, NotifierConfig, ProviderConfig, ResolverConfig};
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DnsProviderFactory, Notifier, NotifierFactory, Resolver, ResolverFactory};
use std::collections::HashMap;

/// Registry mapping component type names to factories
#[derive(Default)]
pub struct ComponentRegistry {
    /// Registered resolver factories
    resolvers: HashMap<String, Box<dyn ResolverFactory>>,

    /// Registered DNS provider factories
    providers: HashMap<String, Box<dyn DnsProviderFactory>>,

    /// Registered notifier factories
    notifiers: HashMap<String, Box<dyn NotifierFactory>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver factory under a type name (e.g., "ipify", "livebox")
    pub fn register_resolver(&mut self, name: impl Into<String>, factory: Box<dyn ResolverFactory>) {
        self.resolvers.insert(name.into(), factory);
    }

    /// Register a DNS provider factory under a type name (e.g., "gandi")
    pub fn register_provider(&mut self, name: impl Into<String>, factory: Box<dyn DnsProviderFactory>) {
        self.providers.insert(name.into(), factory);
    }

    /// Register a notifier factory under a type name (e.g., "discord")
    pub fn register_notifier(&mut self, name: impl Into<String>, factory: Box<dyn NotifierFactory>) {
        self.notifiers.insert(name.into(), factory);
    }

    /// Create a resolver from configuration
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the config is invalid or its type is not registered.
    pub fn create_resolver(&self, config: &ResolverConfig, http: &HttpConfig) -> Result<Box<dyn Resolver>> {
        config.validate()?;
        let type_name = config.type_name();
        let factory = self
            .resolvers
            .get(type_name)
            .ok_or_else(|| Error::config(format!("Resolver type '{}' is not registered", type_name)))?;
        factory.create(config, http)
    }

    /// Create a DNS provider from configuration
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the config is invalid or its type is not registered.
    pub fn create_provider(&self, config: &ProviderConfig, http: &HttpConfig) -> Result<Box<dyn DnsProvider>> {
        config.validate()?;
        let type_name = config.type_name();
        let factory = self
            .providers
            .get(type_name)
            .ok_or_else(|| Error::config(format!("Provider type '{}' is not registered", type_name)))?;
        factory.create(config, http)
    }

    /// Create a notifier from configuration
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the config is invalid or its type is not registered.
    pub fn create_notifier(&self, config: &NotifierConfig, http: &HttpConfig) -> Result<Box<dyn Notifier>> {
        config.validate()?;
        let type_name = config.type_name();
        let factory = self
            .notifiers
            .get(type_name)
            .ok_or_else(|| Error::config(format!("Notifier type '{}' is not registered", type_name)))?;
        factory.create(config, http)
    }

    /// Check if a resolver type is registered
    pub fn has_resolver(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Check if a notifier type is registered
    pub fn has_notifier(&self, name: &str) -> bool {
        self.notifiers.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ResolvedAddresses;
    use async_trait::async_trait;

    struct FixedResolver;

    #[async_trait]
    impl Resolver for FixedResolver {
        async fn resolve(&self) -> Result<ResolvedAddresses> {
            Ok(ResolvedAddresses::V4("203.0.113.5".parse().unwrap()))
        }

        fn resolver_name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FixedFactory;

    impl ResolverFactory for FixedFactory {
        fn create(&self, _config: &ResolverConfig, _http: &HttpConfig) -> Result<Box<dyn Resolver>> {
            Ok(Box::new(FixedResolver))
        }
    }

    #[test]
    fn registered_factory_is_used() {
        let mut registry = ComponentRegistry::new();
        registry.register_resolver("ipify", Box::new(FixedFactory));

        assert!(registry.has_resolver("ipify"));
        let resolver = registry
            .create_resolver(&ResolverConfig::ipify(), &HttpConfig::default())
            .unwrap();
        assert_eq!(resolver.resolver_name(), "fixed");
    }

    #[test]
    fn unknown_type_is_a_config_error() {
        let registry = ComponentRegistry::new();
        let result = registry.create_provider(&ProviderConfig::gandi("key"), &HttpConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(!registry.has_provider("gandi"));
        assert!(!registry.has_notifier("discord"));
    }

    #[test]
    fn invalid_config_rejected_before_lookup() {
        let mut registry = ComponentRegistry::new();
        registry.register_resolver("livebox", Box::new(FixedFactory));

        let config = ResolverConfig::Livebox { url: String::new() };
        assert!(registry.create_resolver(&config, &HttpConfig::default()).is_err());
    }
}
