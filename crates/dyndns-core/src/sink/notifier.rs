//! Notifier-backed sink

use async_trait::async_trait;

use super::LineSink;
use crate::traits::{NotificationMessage, Notifier};

/// Posts each line as an error-severity notification
pub struct NotifierSink {
    notifier: Box<dyn Notifier>,
}

impl NotifierSink {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl LineSink for NotifierSink {
    async fn write_line(&self, line: &str) -> Result<(), crate::Error> {
        self.notifier
            .post_error(NotificationMessage::from_line(line.trim_end()))
            .await
    }
}
