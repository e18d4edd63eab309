//! Test doubles and common utilities for reconciler contract tests
//!
//! These doubles count calls and record arguments so the tests can verify
//! what the reconciler asked of each collaborator, without any network.

#![allow(dead_code)]

use async_trait::async_trait;
use dyndns_core::config::RunConfig;
use dyndns_core::error::{Error, Result};
use dyndns_core::traits::{
    DnsProvider, DnsRecordEntry, DnsRecordSet, NotificationMessage, Notifier, ResolvedAddresses,
    Resolver,
};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Produces a fresh error for a failing double
pub type ErrorFn = fn() -> Error;

/// A resolver that always returns the same addresses, or always fails
pub struct StaticResolver {
    addresses: ResolvedAddresses,
    fail_with: Option<ErrorFn>,
    resolve_call_count: Arc<AtomicUsize>,
}

impl StaticResolver {
    pub fn new(addresses: ResolvedAddresses) -> Self {
        Self {
            addresses,
            fail_with: None,
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A resolver whose every call fails with the given error
    pub fn failing(fail_with: ErrorFn) -> Self {
        Self {
            fail_with: Some(fail_with),
            ..Self::new(v4("192.0.2.1"))
        }
    }

    /// Get the number of times resolve() was called
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resolver for StaticResolver {
    async fn resolve(&self) -> Result<ResolvedAddresses> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        match self.fail_with {
            Some(make_error) => Err(make_error()),
            None => Ok(self.addresses),
        }
    }

    fn resolver_name(&self) -> &'static str {
        "static"
    }
}

/// A single recorded put_records() call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutCall {
    pub domain: String,
    pub record: String,
    pub addresses: Vec<IpAddr>,
    pub ttl: u32,
}

/// A DNS provider backed by an in-memory record set
///
/// A successful put replaces the stored set, so a second run sees what the
/// first one wrote.
pub struct RecordingProvider {
    records: Arc<Mutex<DnsRecordSet>>,
    get_call_count: Arc<AtomicUsize>,
    put_calls: Arc<Mutex<Vec<PutCall>>>,
    fail_get_with: Option<ErrorFn>,
    fail_put_with: Option<ErrorFn>,
}

impl RecordingProvider {
    pub fn new(records: DnsRecordSet) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            get_call_count: Arc::new(AtomicUsize::new(0)),
            put_calls: Arc::new(Mutex::new(Vec::new())),
            fail_get_with: None,
            fail_put_with: None,
        }
    }

    /// Create a provider that shares record state and counters with another one
    pub fn sharing_counters_with(other: &RecordingProvider) -> Self {
        Self {
            records: Arc::clone(&other.records),
            get_call_count: Arc::clone(&other.get_call_count),
            put_calls: Arc::clone(&other.put_calls),
            fail_get_with: other.fail_get_with,
            fail_put_with: other.fail_put_with,
        }
    }

    pub fn failing_get(mut self, fail_with: ErrorFn) -> Self {
        self.fail_get_with = Some(fail_with);
        self
    }

    pub fn failing_put(mut self, fail_with: ErrorFn) -> Self {
        self.fail_put_with = Some(fail_with);
        self
    }

    /// Get the number of times get_records() was called
    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    /// Every put_records() call, in order
    pub fn put_calls(&self) -> Vec<PutCall> {
        self.put_calls.lock().unwrap().clone()
    }

    /// The record set as it currently stands
    pub fn current_records(&self) -> DnsRecordSet {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsProvider for RecordingProvider {
    async fn get_records(&self, _domain: &str, _record: &str) -> Result<DnsRecordSet> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(make_error) = self.fail_get_with {
            return Err(make_error());
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn put_records(
        &self,
        domain: &str,
        record: &str,
        addresses: &[IpAddr],
        ttl: u32,
    ) -> Result<()> {
        self.put_calls.lock().unwrap().push(PutCall {
            domain: domain.to_string(),
            record: record.to_string(),
            addresses: addresses.to_vec(),
            ttl,
        });
        if let Some(make_error) = self.fail_put_with {
            return Err(make_error());
        }

        let entries = addresses
            .iter()
            .map(|ip| DnsRecordEntry::for_ip(*ip, ttl))
            .collect::<Vec<_>>();
        *self.records.lock().unwrap() = DnsRecordSet::new(entries);
        Ok(())
    }

    fn records_admin_url(&self, domain: &str) -> String {
        format!("https://admin.test/domain/{}/records", domain)
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// A notifier that keeps every posted message
pub struct CapturingNotifier {
    messages: Arc<Mutex<Vec<NotificationMessage>>>,
    fail_with: Option<ErrorFn>,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(fail_with: ErrorFn) -> Self {
        Self {
            fail_with: Some(fail_with),
            ..Self::new()
        }
    }

    /// Create a notifier that shares captured messages with another one
    pub fn sharing_counters_with(other: &CapturingNotifier) -> Self {
        Self {
            messages: Arc::clone(&other.messages),
            fail_with: other.fail_with,
        }
    }

    /// Every message posted so far, including failed attempts
    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn post_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for CapturingNotifier {
    async fn post(&self, message: &NotificationMessage) -> Result<()> {
        self.messages.lock().unwrap().push(message.clone());
        match self.fail_with {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }

    fn notifier_name(&self) -> &'static str {
        "capturing"
    }
}

/// Parse an IPv4-only resolution
pub fn v4(ip: &str) -> ResolvedAddresses {
    ResolvedAddresses::V4(ip.parse().unwrap())
}

/// Parse a dual-stack resolution
pub fn dual(v4: &str, v6: &str) -> ResolvedAddresses {
    ResolvedAddresses::DualStack {
        v4: v4.parse().unwrap(),
        v6: v6.parse().unwrap(),
    }
}

/// Build a record set with one entry per address
pub fn record_set(ips: &[&str]) -> DnsRecordSet {
    DnsRecordSet::new(
        ips.iter()
            .map(|ip| DnsRecordEntry::for_ip(ip.parse().unwrap(), 3600))
            .collect(),
    )
}

/// Parse a list of addresses
pub fn ips(values: &[&str]) -> Vec<IpAddr> {
    values.iter().map(|ip| ip.parse().unwrap()).collect()
}

/// Minimal run config for tests
pub fn run_config(always_notify: bool) -> RunConfig {
    RunConfig::new("example.com", "home").with_always_notify(always_notify)
}
