//! Local stream sink

use async_trait::async_trait;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use super::LineSink;

/// Writes each line, newline-terminated, to a local stream
pub struct StreamSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamSink {
    /// Sink over any writer
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Sink over the process's standard error
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }
}

#[async_trait]
impl LineSink for StreamSink {
    async fn write_line(&self, line: &str) -> Result<(), crate::Error> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", line.trim_end())?;
        writer.flush()?;
        Ok(())
    }
}
