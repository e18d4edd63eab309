// # dyndns-core
//
// Core library for dyndns: keeps one DNS record in sync with the host's
// current public IPv4/IPv6 address(es) and reports what happened.
//
// ## Architecture Overview
//
// - **Resolver**: Trait for discovering the current public address(es)
// - **DnsProvider**: Trait for reading and replacing a record set
// - **Notifier**: Trait for posting outcomes to a notification channel
// - **Reconciler**: Orchestrates resolve → read → decide → write → notify
// - **ComponentRegistry**: Plugin-based registry for the three collaborators
// - **CompositeSink**: Mirrors diagnostic lines to stderr and the notifier
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Decision logic is separate from API clients
// 2. **Sequential**: One run performs at most four awaited network calls
// 3. **Plugin-Based**: Implementations are registered, not hard-coded
// 4. **Stateless**: Nothing is cached or persisted between runs

pub mod traits;
pub mod engine;
pub mod registry;
pub mod config;
pub mod error;
pub mod sink;

// Re-export core types for convenience
pub use traits::{DnsProvider, Notifier, Resolver};
pub use engine::{Reconciler, ReconcileState, RunOutcome, UpdatePlan};
pub use registry::ComponentRegistry;
pub use config::{HttpConfig, NotifierConfig, ProviderConfig, ResolverConfig, RunConfig};
pub use error::{Error, Result};
pub use sink::{CompositeSink, LineSink, NotifierSink, StreamSink};
