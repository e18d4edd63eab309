//! Command-line surface

use clap::{Parser, ValueEnum};
use dyndns_core::config::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TTL, HttpConfig, NotifierConfig, ProviderConfig,
    ResolverConfig, RunConfig,
};
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Keep a Gandi LiveDNS record pointed at this host's public IP address(es)
#[derive(Debug, Clone, Parser)]
#[command(name = "dyndns", author, version, about, long_about = None)]
pub struct Cli {
    /// Domain managed at Gandi (e.g. example.com)
    #[arg(long)]
    pub domain: String,

    /// Record name within the domain (e.g. home)
    #[arg(long)]
    pub record: String,

    /// TTL of the written record set, in seconds
    #[arg(long, default_value_t = DEFAULT_TTL)]
    pub ttl: u32,

    /// Also notify when the record is already up to date
    #[arg(long, default_value_t = false, action)]
    pub always_notify: bool,

    /// Ask the Livebox router for the WAN addresses instead of ipify
    #[arg(long, default_value_t = false, action)]
    pub livebox: bool,

    /// Livebox web-service endpoint
    #[arg(long, value_name = "URL", default_value = "http://192.168.1.1/ws")]
    pub livebox_url: String,

    /// Gandi API key
    #[arg(long, value_name = "TOKEN", env = "GANDI_TOKEN", hide_env_values = true)]
    pub gandi_token: String,

    /// Gandi API root
    #[arg(long, value_name = "URL", default_value = "https://api.gandi.net", hide = true)]
    pub gandi_api_url: String,

    /// Discord webhook receiving notifications
    #[arg(
        long,
        value_name = "URL",
        env = "DISCORD_WEBHOOK_URL",
        hide_env_values = true
    )]
    pub webhook_url: String,

    /// Timeout applied to every HTTP request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Set the log level
    #[arg(
        value_enum,
        long,
        value_name = "LEVEL",
        default_value_t = LogLevel::Info,
        env = "DYNDNS_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(self.domain.trim(), self.record.trim())
            .with_ttl(self.ttl)
            .with_always_notify(self.always_notify)
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout_secs: self.timeout,
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        if self.livebox {
            ResolverConfig::Livebox {
                url: self.livebox_url.clone(),
            }
        } else {
            ResolverConfig::ipify()
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::Gandi {
            api_key: self.gandi_token.clone(),
            base_url: self.gandi_api_url.clone(),
        }
    }

    pub fn notifier_config(&self) -> NotifierConfig {
        NotifierConfig::discord(self.webhook_url.clone())
    }
}
