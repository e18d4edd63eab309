//! Core traits for dyndns
//!
//! This module defines the abstract interfaces the reconciler is built on.
//!
//! - [`Resolver`]: Discover the host's public addresses
//! - [`DnsProvider`]: Read and replace a record set at a DNS provider
//! - [`Notifier`]: Post run outcomes to a notification channel

pub mod resolver;
pub mod dns_provider;
pub mod notifier;

pub use resolver::{IpVersion, ResolvedAddresses, Resolver, ResolverFactory};
pub use dns_provider::{DnsProvider, DnsProviderFactory, DnsRecordEntry, DnsRecordSet, RecordType};
pub use notifier::{Field, NotificationMessage, Notifier, NotifierFactory, Severity};
