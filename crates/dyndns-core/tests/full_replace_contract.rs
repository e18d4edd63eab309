//! Contract Test: Full Replace Write
//!
//! This test verifies the shape of the write the reconciler performs.
//!
//! Constraints verified:
//! - The write always carries the complete resolved address set
//! - The configured domain, record name and ttl are passed through
//!
//! If this test fails, an update can silently drop a family that was
//! already correct.

mod common;

use common::*;
use dyndns_core::Reconciler;

#[tokio::test]
async fn put_receives_every_resolved_address_when_only_v6_changed() {
    let provider = RecordingProvider::new(record_set(&["203.0.113.5", "2001:db8::ffff"]));
    let notifier = CapturingNotifier::new();
    let reconciler = Reconciler::new(
        Box::new(StaticResolver::new(dual("203.0.113.5", "2001:db8::1"))),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        Box::new(CapturingNotifier::sharing_counters_with(&notifier)),
    );

    reconciler.run(&run_config(false)).await.unwrap();

    let calls = provider.put_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].addresses, ips(&["203.0.113.5", "2001:db8::1"]));
}

#[tokio::test]
async fn put_receives_every_resolved_address_when_only_v4_changed() {
    let provider = RecordingProvider::new(record_set(&["198.51.100.7", "2001:db8::1"]));
    let notifier = CapturingNotifier::new();
    let reconciler = Reconciler::new(
        Box::new(StaticResolver::new(dual("203.0.113.5", "2001:db8::1"))),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        Box::new(CapturingNotifier::sharing_counters_with(&notifier)),
    );

    reconciler.run(&run_config(false)).await.unwrap();

    let calls = provider.put_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].addresses, ips(&["203.0.113.5", "2001:db8::1"]));
}

#[tokio::test]
async fn put_carries_domain_record_and_ttl() {
    let provider = RecordingProvider::new(record_set(&[]));
    let notifier = CapturingNotifier::new();
    let reconciler = Reconciler::new(
        Box::new(StaticResolver::new(v4("203.0.113.5"))),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        Box::new(CapturingNotifier::sharing_counters_with(&notifier)),
    );

    let config = run_config(false).with_ttl(600);
    reconciler.run(&config).await.unwrap();

    assert_eq!(
        provider.put_calls(),
        vec![PutCall {
            domain: "example.com".to_string(),
            record: "home".to_string(),
            addresses: ips(&["203.0.113.5"]),
            ttl: 600,
        }]
    );
}
