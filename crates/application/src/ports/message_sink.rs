use async_trait::async_trait;
use ferrous_collector_domain::{DnsMessage, DomainError};
use std::time::Duration;

/// Output destination for decoded messages.
///
/// Each sink is owned by exactly one delivery worker, which calls `write`
/// for every queued message, `flush` periodically and once at shutdown,
/// then `close`.
#[async_trait]
pub trait MessageSink: Send {
    fn name(&self) -> &str;

    async fn write(&mut self, message: &DnsMessage) -> Result<(), DomainError>;

    async fn flush(&mut self) -> Result<(), DomainError>;

    async fn close(&mut self) -> Result<(), DomainError>;

    /// How often buffered output should be flushed while messages keep
    /// arriving. `None` flushes only at shutdown.
    fn flush_interval(&self) -> Option<Duration> {
        None
    }
}
