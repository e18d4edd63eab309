//! Diagnostic line sinks
//!
//! Diagnostics emitted at the process boundary go to a [`CompositeSink`],
//! which forwards every line to each registered destination in order.
//! The usual setup is a local stream first and the notifier second, so a
//! failure to post never keeps a line from reaching stderr.

mod notifier;
mod stream;

pub use notifier::NotifierSink;
pub use stream::StreamSink;

use async_trait::async_trait;

/// A destination for diagnostic lines
#[async_trait]
pub trait LineSink: Send + Sync {
    /// Deliver one line
    async fn write_line(&self, line: &str) -> Result<(), crate::Error>;
}

/// Fans each line out to several sinks, in registration order
#[derive(Default)]
pub struct CompositeSink {
    destinations: Vec<Box<dyn LineSink>>,
}

impl CompositeSink {
    /// Create an empty composite sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a destination
    pub fn with(mut self, destination: Box<dyn LineSink>) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Number of registered destinations
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Whether no destination is registered
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[async_trait]
impl LineSink for CompositeSink {
    /// Writes to every destination even if an earlier one fails, then
    /// returns the first failure.
    async fn write_line(&self, line: &str) -> Result<(), crate::Error> {
        let mut first_error = None;
        for destination in &self.destinations {
            if let Err(e) = destination.write_line(line).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
