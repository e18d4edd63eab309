//! Record reconciler
//!
//! The Reconciler is responsible for:
//! - Resolving the host's public addresses via a Resolver
//! - Reading the current record set via a DnsProvider
//! - Deciding whether the record set is out of date
//! - Replacing the record set when needed
//! - Reporting the outcome via a Notifier
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐
//! │  Resolver   │    │ DnsProvider  │    │  Notifier   │
//! │ (resolve)   │    │ (get / put)  │    │  (post)     │
//! └─────────────┘    └──────────────┘    └─────────────┘
//!        ▲                  ▲                   ▲
//!        └──────────────────┼───────────────────┘
//!                           │
//!                   ┌──────────────┐
//!                   │  Reconciler  │
//!                   └──────────────┘
//! ```
//!
//! ## Run Flow
//!
//! 1. Resolve current addresses
//! 2. Read the record set
//! 3. Compute the [`UpdatePlan`]
//! 4. Empty plan: optionally post an info notification, stop
//! 5. Otherwise write the full resolved set, then post a success notification
//!
//! Every step fails fast; the first error is returned as-is.

mod plan;

pub use plan::UpdatePlan;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::traits::{
    DnsProvider, Field, IpVersion, NotificationMessage, Notifier, ResolvedAddresses, Resolver,
};
use std::fmt;
use tracing::{debug, info, warn};

/// Steps of a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    ResolvingIps,
    ReadingDns,
    Deciding,
    NoActionNeeded,
    Updating,
    Notifying,
    Done,
}

impl fmt::Display for ReconcileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReconcileState::ResolvingIps => "resolving IPs",
            ReconcileState::ReadingDns => "reading DNS",
            ReconcileState::Deciding => "deciding",
            ReconcileState::NoActionNeeded => "no action needed",
            ReconcileState::Updating => "updating",
            ReconcileState::Notifying => "notifying",
            ReconcileState::Done => "done",
        };
        f.write_str(name)
    }
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The record set already held every resolved address
    UpToDate {
        addresses: ResolvedAddresses,
        /// Whether an info notification was posted
        notified: bool,
    },

    /// The record set was replaced with these addresses
    Updated { addresses: ResolvedAddresses },
}

/// Core reconciler
///
/// Holds the three collaborators, chosen once at startup. A run performs at
/// most four sequential network calls: resolve, read, write, notify.
pub struct Reconciler {
    /// Address resolver
    resolver: Box<dyn Resolver>,

    /// DNS provider for reading and writing the record set
    provider: Box<dyn DnsProvider>,

    /// Notification channel
    notifier: Box<dyn Notifier>,
}

impl Reconciler {
    /// Create a new reconciler from its collaborators
    pub fn new(
        resolver: Box<dyn Resolver>,
        provider: Box<dyn DnsProvider>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            resolver,
            provider,
            notifier,
        }
    }

    /// Run one reconciliation
    ///
    /// # Returns
    ///
    /// - `Ok(RunOutcome)`: the record set is (now) up to date
    /// - `Err(Error)`: the first collaborator error; a failure to post the
    ///   final notification comes back as [`Error::Notification`] and does
    ///   not undo an already successful write
    pub async fn run(&self, config: &RunConfig) -> Result<RunOutcome> {
        config.validate()?;

        let mut state = ReconcileState::ResolvingIps;
        let result = self.run_steps(config, &mut state).await;

        if let Err(e) = &result {
            warn!("Reconciliation of {} failed while {}: {}", config.fqdn(), state, e);
        }
        result
    }

    async fn run_steps(&self, config: &RunConfig, state: &mut ReconcileState) -> Result<RunOutcome> {
        debug!("State: {} (resolver: {})", state, self.resolver.resolver_name());
        let addresses = self.resolver.resolve().await?;
        info!("Current dynamic IP(s): {}", addresses);

        advance(state, ReconcileState::ReadingDns);
        let records = self
            .provider
            .get_records(&config.domain, &config.record)
            .await?;
        debug!(
            "IP(s) from DNS: {:?}",
            records.values().map(ToString::to_string).collect::<Vec<_>>()
        );

        advance(state, ReconcileState::Deciding);
        let plan = UpdatePlan::compute(&addresses, &records);

        if plan.is_empty() {
            advance(state, ReconcileState::NoActionNeeded);
            info!("IP address(es) match - no further action");

            let notified = if config.always_notify {
                advance(state, ReconcileState::Notifying);
                self.notifier
                    .post_info(no_action_message(config))
                    .await
                    .map_err(Error::notification)?;
                true
            } else {
                false
            };

            advance(state, ReconcileState::Done);
            return Ok(RunOutcome::UpToDate { addresses, notified });
        }

        advance(state, ReconcileState::Updating);
        debug!("Out of date: {:?}", plan.addresses());

        // Full replace: write every resolved address so that a family that
        // is already correct is not dropped.
        self.provider
            .put_records(&config.domain, &config.record, &addresses.values(), config.ttl)
            .await?;
        info!("DNS record for {} updated", config.fqdn());

        advance(state, ReconcileState::Notifying);
        let message = updated_message(config, &addresses, &self.provider.records_admin_url(&config.domain));
        self.notifier
            .post_success(message)
            .await
            .map_err(Error::notification)?;

        advance(state, ReconcileState::Done);
        Ok(RunOutcome::Updated { addresses })
    }
}

fn advance(state: &mut ReconcileState, next: ReconcileState) {
    debug!("State: {} -> {}", state, next);
    *state = next;
}

fn no_action_message(config: &RunConfig) -> NotificationMessage {
    NotificationMessage::new(format!(
        "IP address(es) match for record {} - no further action",
        config.fqdn()
    ))
    .with_description(
        "To disable notifications when nothing happens, remove the `--always-notify` flag",
    )
}

fn updated_message(
    config: &RunConfig,
    addresses: &ResolvedAddresses,
    admin_url: &str,
) -> NotificationMessage {
    let message = NotificationMessage::new(format!(
        "DNS record for {} updated with the new IP addresses",
        config.fqdn()
    ))
    .with_description(format!("See [{} records]({})", config.domain, admin_url));

    addresses.values().iter().fold(message, |message, ip| {
        message.with_field(Field::inline(IpVersion::of(ip).label(), ip.to_string()))
    })
}
