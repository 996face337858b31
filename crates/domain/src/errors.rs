use thiserror::Error;

/// Runtime failures of the pipeline collaborators (filter lists, sinks, collectors).
///
/// Wire-level failures are [`crate::DecodeError`] and never end up here.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid filter rule: {0}")]
    InvalidFilterRule(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Sink {sink} write failed: {reason}")]
    SinkWrite { sink: String, reason: String },

    #[error("Sink {sink} rejected batch with HTTP status {status}")]
    SinkRejected { sink: String, status: u16 },

    #[error("Delivery queue for {0} is closed")]
    QueueClosed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::IoError(e.to_string())
    }
}
