// # Discord Notifier
//
// This crate posts dyndns notifications to a Discord channel webhook.
//
// Every message becomes one embed colored by severity. The webhook user
// name identifies the tool and version, and the embed footer names the
// host that ran the check so several machines can share one channel.
//
// ## Security Requirements
//
// - The webhook URL contains its secret token; it NEVER appears in logs or
//   Debug output

mod webhook;

pub use webhook::{Author, Embed, EmbedField, Footer, Image, Webhook};

use async_trait::async_trait;
use dyndns_core::config::{HttpConfig, NotifierConfig};
use dyndns_core::traits::{NotificationMessage, Notifier, NotifierFactory, Severity};
use dyndns_core::{ComponentRegistry, Error, Result};
use webhook::non_empty;

/// Default webhook user name: tool name and version
pub fn default_username() -> String {
    format!("dyndns {}", env!("CARGO_PKG_VERSION"))
}

/// Name of the machine running dyndns, for the embed footer
fn local_hostname() -> Option<String> {
    match hostname::get() {
        Ok(name) => non_empty(&name.to_string_lossy()),
        Err(e) => {
            tracing::warn!("Could not read host name for notifications: {}", e);
            None
        }
    }
}

/// Discord webhook notifier
pub struct DiscordNotifier {
    /// Full webhook URL
    /// ⚠️ NEVER log this value
    webhook_url: String,

    /// Name shown as the message author
    username: String,

    /// Footer text; omitted when the host name is unknown
    hostname: Option<String>,

    client: reqwest::Client,
}

// Hides the webhook token
impl std::fmt::Debug for DiscordNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordNotifier")
            .field("webhook_url", &"<REDACTED>")
            .field("username", &self.username)
            .field("hostname", &self.hostname)
            .finish()
    }
}

impl DiscordNotifier {
    /// Create a notifier for a webhook URL
    ///
    /// `username` falls back to [`default_username`].
    pub fn new(
        webhook_url: impl Into<String>,
        username: Option<String>,
        http: &HttpConfig,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(http.timeout())
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            webhook_url: webhook_url.into(),
            username: username.unwrap_or_else(default_username),
            hostname: local_hostname(),
            client,
        })
    }

    /// Override the footer text
    pub fn with_hostname(mut self, hostname: Option<String>) -> Self {
        self.hostname = hostname;
        self
    }

    /// Build the webhook body for a message
    pub fn build_webhook(&self, message: &NotificationMessage) -> Webhook {
        let timestamp = match message.severity {
            Severity::Error => None,
            Severity::Info | Severity::Success => Some(chrono::Utc::now().to_rfc3339()),
        };

        let embed = Embed {
            title: non_empty(&message.title),
            description: non_empty(&message.description),
            color: message.severity.color(),
            fields: message
                .fields
                .iter()
                .map(|field| EmbedField {
                    name: field.label.clone(),
                    value: field.value.clone(),
                    inline: field.inline,
                })
                .collect(),
            footer: self.hostname.as_ref().map(|text| Footer {
                text: text.clone(),
                icon_url: None,
            }),
            timestamp,
            ..Embed::default()
        };

        Webhook {
            username: Some(self.username.clone()),
            embeds: vec![embed],
            ..Webhook::default()
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn post(&self, message: &NotificationMessage) -> Result<()> {
        let payload = serde_json::to_vec(&self.build_webhook(message))?;
        tracing::debug!("Posting {:?} notification: {}", message.severity, message.title);

        let response = self
            .client
            .post(&self.webhook_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::network(format!("Webhook request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(Error::api(status.as_u16(), body));
        }

        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "discord"
    }
}

/// Factory for creating Discord notifiers
pub struct DiscordFactory;

impl NotifierFactory for DiscordFactory {
    fn create(&self, config: &NotifierConfig, http: &HttpConfig) -> Result<Box<dyn Notifier>> {
        match config {
            NotifierConfig::Discord {
                webhook_url,
                username,
            } => Ok(Box::new(DiscordNotifier::new(
                webhook_url.clone(),
                username.clone(),
                http,
            )?)),
        }
    }
}

/// Register the Discord notifier with a registry
pub fn register(registry: &mut ComponentRegistry) {
    registry.register_notifier("discord", Box::new(DiscordFactory));
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyndns_core::traits::Field;

    fn notifier() -> DiscordNotifier {
        DiscordNotifier::new("https://discord.test/api/webhooks/1/secret-token", None, &HttpConfig::default())
            .unwrap()
            .with_hostname(Some("nas".to_string()))
    }

    #[test]
    fn test_success_embed() {
        let message = NotificationMessage::new("updated")
            .with_description("See records")
            .with_field(Field::inline("v4", "203.0.113.5"))
            .with_severity(Severity::Success);

        let webhook = notifier().build_webhook(&message);

        assert_eq!(webhook.username, Some(default_username()));
        assert_eq!(webhook.embeds.len(), 1);
        let embed = &webhook.embeds[0];
        assert_eq!(embed.color, 5_747_840);
        assert_eq!(embed.title.as_deref(), Some("updated"));
        assert_eq!(embed.fields[0].name, "v4");
        assert!(embed.fields[0].inline);
        assert_eq!(embed.footer.as_ref().map(|f| f.text.as_str()), Some("nas"));
        assert!(embed.timestamp.is_some());
    }

    #[test]
    fn test_error_embed_has_no_timestamp_or_title() {
        let webhook = notifier().build_webhook(&NotificationMessage::from_line("error: boom"));

        let embed = &webhook.embeds[0];
        assert_eq!(embed.color, 15_092_300);
        assert_eq!(embed.title, None);
        assert_eq!(embed.description.as_deref(), Some("error: boom"));
        assert_eq!(embed.timestamp, None);
    }

    #[test]
    fn test_custom_username() {
        let notifier =
            DiscordNotifier::new("https://discord.test/hook", Some("home".to_string()), &HttpConfig::default())
                .unwrap();
        let webhook = notifier.build_webhook(&NotificationMessage::new("x"));
        assert_eq!(webhook.username.as_deref(), Some("home"));
    }

    #[test]
    fn test_webhook_url_not_exposed_in_debug() {
        let debug_str = format!("{:?}", notifier());
        assert!(!debug_str.contains("secret-token"));
        assert!(debug_str.contains("DiscordNotifier"));
    }

    #[test]
    fn test_register() {
        let mut registry = ComponentRegistry::new();
        register(&mut registry);
        assert!(registry.has_notifier("discord"));
    }
}
