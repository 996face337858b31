use super::format::render;
use async_trait::async_trait;
use ferrous_collector_application::ports::MessageSink;
use ferrous_collector_domain::config::{OutputMode, StdoutConfig};
use ferrous_collector_domain::{DnsMessage, DomainError};
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};

const SINK_NAME: &str = "stdout";

/// Writes one line per message and flushes it right away.
pub struct StdoutSink<W = Stdout> {
    mode: OutputMode,
    writer: W,
}

impl StdoutSink {
    pub fn new(config: &StdoutConfig) -> Self {
        Self::with_writer(config.mode, tokio::io::stdout())
    }
}

impl<W> StdoutSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn with_writer(mode: OutputMode, writer: W) -> Self {
        Self { mode, writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn io_error(e: std::io::Error) -> DomainError {
        DomainError::SinkWrite {
            sink: SINK_NAME.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl<W> MessageSink for StdoutSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &str {
        SINK_NAME
    }

    async fn write(&mut self, message: &DnsMessage) -> Result<(), DomainError> {
        let mut line = render(self.mode, message)?;
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(Self::io_error)?;
        self.writer.flush().await.map_err(Self::io_error)
    }

    async fn flush(&mut self) -> Result<(), DomainError> {
        self.writer.flush().await.map_err(Self::io_error)
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        self.flush().await
    }
}
