use super::format::render;
use async_trait::async_trait;
use ferrous_collector_application::ports::MessageSink;
use ferrous_collector_domain::config::{LogFileConfig, OutputMode};
use ferrous_collector_domain::{DnsMessage, DomainError};
use std::path::Path;
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

const SINK_NAME: &str = "logfile";

/// Appends one line per message to a file, buffered between flushes.
pub struct LogFileSink {
    path: String,
    mode: OutputMode,
    writer: BufWriter<File>,
    flush_interval: Option<Duration>,
}

impl LogFileSink {
    /// Opens `file_path` for appending, creating missing parent directories.
    pub async fn open(config: &LogFileConfig) -> Result<Self, DomainError> {
        let path = Path::new(&config.file_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to create log directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to open log file {}: {}",
                    config.file_path, e
                ))
            })?;

        info!(path = %config.file_path, mode = ?config.mode, "Log file sink opened");

        Ok(Self {
            path: config.file_path.clone(),
            mode: config.mode,
            writer: BufWriter::new(file),
            flush_interval: (config.flush_interval > 0)
                .then(|| Duration::from_secs(config.flush_interval)),
        })
    }

    fn io_error(&self, e: std::io::Error) -> DomainError {
        DomainError::SinkWrite {
            sink: SINK_NAME.to_string(),
            reason: format!("{}: {}", self.path, e),
        }
    }
}

#[async_trait]
impl MessageSink for LogFileSink {
    fn name(&self) -> &str {
        SINK_NAME
    }

    async fn write(&mut self, message: &DnsMessage) -> Result<(), DomainError> {
        let mut line = render(self.mode, message)?;
        line.push('\n');
        if let Err(e) = self.writer.write_all(line.as_bytes()).await {
            return Err(self.io_error(e));
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), DomainError> {
        if let Err(e) = self.writer.flush().await {
            return Err(self.io_error(e));
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        self.flush().await?;
        if let Err(e) = self.writer.get_ref().sync_all().await {
            return Err(self.io_error(e));
        }
        Ok(())
    }

    fn flush_interval(&self) -> Option<Duration> {
        self.flush_interval
    }
}
