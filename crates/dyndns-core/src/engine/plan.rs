//! Update decision
//!
//! Compares resolved addresses against the provider's record set and
//! yields the addresses that still have to be written.

use crate::traits::{DnsRecordSet, IpVersion, ResolvedAddresses};
use std::net::IpAddr;

/// Addresses missing from the current record set
///
/// An entry for a family exists if and only if no stored value equals the
/// resolved address of that family. Families the host does not have never
/// appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    addresses: Vec<IpAddr>,
}

impl UpdatePlan {
    /// Decide which resolved addresses are out of date
    pub fn compute(resolved: &ResolvedAddresses, records: &DnsRecordSet) -> Self {
        let v4 = resolved.get(IpVersion::V4);
        let v6 = resolved.get(IpVersion::V6);

        let mut v4_up_to_date = false;
        let mut v6_up_to_date = false;

        // Families are checked independently for every stored value.
        for value in records.values() {
            if !v4_up_to_date && v4.is_some_and(|ip| same_address(&ip, value)) {
                v4_up_to_date = true;
            }
            if !v6_up_to_date && v6.is_some_and(|ip| same_address(&ip, value)) {
                v6_up_to_date = true;
            }
        }

        let addresses = [(v4, v4_up_to_date), (v6, v6_up_to_date)]
            .into_iter()
            .filter_map(|(ip, up_to_date)| ip.filter(|_| !up_to_date))
            .collect();

        Self { addresses }
    }

    /// Addresses to write, v4 first
    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }

    /// Whether the plan touches the given family
    pub fn contains(&self, version: IpVersion) -> bool {
        self.addresses.iter().any(|ip| IpVersion::of(ip) == version)
    }

    /// True when the record set is already up to date
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

// IPv4-mapped IPv6 values compare equal to their IPv4 form.
fn same_address(a: &IpAddr, b: &IpAddr) -> bool {
    a.to_canonical() == b.to_canonical()
}
