//! Error types for dyndns
//!
//! Every collaborator (resolver, record client, notifier) reports failures
//! through the single [`Error`] enum defined here.

use thiserror::Error;

/// Result type alias for dyndns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dyndns
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: connection refused, DNS lookup of the API
    /// host, timeout, or a non-success status from an IP echo service
    #[error("Network error: {0}")]
    Network(String),

    /// A response body that should be an IP literal is not one
    #[error("Parse error: {0}")]
    Parse(String),

    /// A response body does not match the expected structured shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The remote endpoint answered with a non-success status
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Posting the outcome notification failed after the DNS write succeeded
    #[error("failed to post notification: {0}")]
    Notification(#[source] Box<Error>),

    /// Local I/O errors (writing diagnostics to stderr)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an API error from a status code and raw body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap a notifier failure that happened after a successful write
    pub fn notification(err: Error) -> Self {
        Self::Notification(Box::new(err))
    }

    /// HTTP status carried by an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Notification(inner) => inner.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
