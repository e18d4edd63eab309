// # Notifier Trait
//
// Defines the interface for posting run outcomes to a notification channel.
//
// ## Implementations
//
// - Discord webhooks: `dyndns-notify-discord` crate

use async_trait::async_trait;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Fixed embed color for this severity
    pub fn color(self) -> u32 {
        match self {
            Severity::Info => 2_201_331,
            Severity::Success => 5_747_840,
            Severity::Error => 15_092_300,
        }
    }
}

/// A labeled value shown alongside a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
    pub inline: bool,
}

impl Field {
    /// Create an inline field
    pub fn inline(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            inline: true,
        }
    }
}

/// A structured notification, built fresh for each event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub fields: Vec<Field>,
}

impl NotificationMessage {
    /// Create an info-severity message with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            description: String::new(),
            fields: Vec::new(),
        }
    }

    /// Message carrying only a description, used for mirrored log lines
    pub fn from_line(line: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: String::new(),
            description: line.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Trait for notification channel implementations
///
/// Each call posts exactly one message and reports failure to the caller.
/// Implementations must not retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post a message with the severity it already carries
    ///
    /// # Errors
    ///
    /// - [`Error::Network`](crate::Error::Network): transport failure
    /// - [`Error::Api`](crate::Error::Api): non-success status from the channel
    async fn post(&self, message: &NotificationMessage) -> Result<(), crate::Error>;

    /// Notifier name (for logging/debugging)
    fn notifier_name(&self) -> &'static str;

    /// Post as an informational message
    async fn post_info(&self, message: NotificationMessage) -> Result<(), crate::Error> {
        self.post(&message.with_severity(Severity::Info)).await
    }

    /// Post as a success message
    async fn post_success(&self, message: NotificationMessage) -> Result<(), crate::Error> {
        self.post(&message.with_severity(Severity::Success)).await
    }

    /// Post as an error message
    async fn post_error(&self, message: NotificationMessage) -> Result<(), crate::Error> {
        self.post(&message.with_severity(Severity::Error)).await
    }
}

// Lets one notifier serve both the reconciler and the diagnostic sink.
#[async_trait]
impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    async fn post(&self, message: &NotificationMessage) -> Result<(), crate::Error> {
        (**self).post(message).await
    }

    fn notifier_name(&self) -> &'static str {
        (**self).notifier_name()
    }
}

/// Helper trait for constructing notifiers from configuration
pub trait NotifierFactory: Send + Sync {
    /// Create a Notifier instance from configuration
    fn create(
        &self,
        config: &crate::config::NotifierConfig,
        http: &crate::config::HttpConfig,
    ) -> Result<Box<dyn Notifier>, crate::Error>;
}
