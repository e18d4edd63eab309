// # dyndns
//
// Thin integration layer: parses flags and environment, initializes
// logging and the runtime, registers the component crates and runs one
// reconciliation. All record logic lives in dyndns-core.
//
// ## Configuration
//
// Flags, with secrets taken from the environment:
//
// - `GANDI_TOKEN`: Gandi API key
// - `DISCORD_WEBHOOK_URL`: Discord webhook receiving notifications
// - `DYNDNS_LOG_LEVEL`: log level (trace, debug, info, warn, error)
//
// ## Example
//
// ```bash
// export GANDI_TOKEN=your_key
// export DISCORD_WEBHOOK_URL=https://discord.com/api/webhooks/...
//
// dyndns --domain example.com --record home --ttl 1800
// ```
//
// Meant to be run periodically (cron, systemd timer).

mod cli;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use dyndns_core::traits::Notifier;
use dyndns_core::{
    CompositeSink, ComponentRegistry, LineSink, NotifierSink, Reconciler, RunOutcome, StreamSink,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Record up to date (or help/version printed)
/// - 1: Configuration or startup error
/// - 2: Run failure
#[derive(Debug, Clone, Copy)]
enum DyndnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DyndnsExitCode> for ExitCode {
    fn from(code: DyndnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // No arguments at all: show usage instead of a missing-flag error
    if std::env::args_os().len() <= 1 {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Failed to print usage: {}", e);
            return DyndnsExitCode::ConfigError.into();
        }
        println!();
        return DyndnsExitCode::Success.into();
    }

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DyndnsExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DyndnsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(cli)).into()
}

/// Everything an error report goes through: stderr first, so the line
/// survives a broken notification channel, then the notifier
fn error_sink(notifier: &Arc<dyn Notifier>) -> CompositeSink {
    CompositeSink::new()
        .with(Box::new(StreamSink::stderr()))
        .with(Box::new(NotifierSink::new(Box::new(Arc::clone(notifier)))))
}

async fn report(sink: &CompositeSink, line: &str) {
    if let Err(mirror_err) = sink.write_line(line).await {
        warn!("Failed to mirror error to notifier: {}", mirror_err);
    }
}

fn build_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    dyndns_ip_http::register(&mut registry);
    dyndns_provider_gandi::register(&mut registry);
    dyndns_notify_discord::register(&mut registry);
    registry
}

fn build_reconciler(
    cli: &Cli,
    registry: &ComponentRegistry,
    notifier: &Arc<dyn Notifier>,
) -> Result<Reconciler> {
    let http = cli.http_config();
    let resolver = registry
        .create_resolver(&cli.resolver_config(), &http)
        .context("Failed to create resolver")?;
    let provider = registry
        .create_provider(&cli.provider_config(), &http)
        .context("Failed to create DNS provider")?;

    info!(
        "Using resolver '{}', provider '{}', notifier '{}'",
        resolver.resolver_name(),
        provider.provider_name(),
        notifier.notifier_name()
    );

    Ok(Reconciler::new(resolver, provider, Box::new(Arc::clone(notifier))))
}

async fn run(cli: Cli) -> DyndnsExitCode {
    let registry = build_registry();

    // Without a notifier, errors can only go to stderr
    let notifier: Arc<dyn Notifier> =
        match registry.create_notifier(&cli.notifier_config(), &cli.http_config()) {
            Ok(notifier) => Arc::from(notifier),
            Err(e) => {
                error!("Failed to create notifier: {}", e);
                return DyndnsExitCode::ConfigError;
            }
        };
    let sink = error_sink(&notifier);

    let config = cli.run_config();
    if let Err(e) = config.validate() {
        report(&sink, &format!("error: {}", e)).await;
        return DyndnsExitCode::ConfigError;
    }

    let reconciler = match build_reconciler(&cli, &registry, &notifier) {
        Ok(reconciler) => reconciler,
        Err(e) => {
            report(&sink, &format!("error: {:#}", e)).await;
            return DyndnsExitCode::ConfigError;
        }
    };

    info!("Checking {}", config.fqdn());

    match reconciler.run(&config).await {
        Ok(RunOutcome::UpToDate { addresses, notified }) => {
            info!(
                "{} is up to date with {} (notified: {})",
                config.fqdn(),
                addresses,
                notified
            );
            DyndnsExitCode::Success
        }
        Ok(RunOutcome::Updated { addresses }) => {
            info!("{} now points at {}", config.fqdn(), addresses);
            DyndnsExitCode::Success
        }
        Err(e) => {
            report(&sink, &format!("error: {}", e)).await;
            DyndnsExitCode::RuntimeError
        }
    }
}
