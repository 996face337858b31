mod message_sink;

pub use message_sink::MessageSink;

// Re-export for convenience
pub use ferrous_collector_domain::DnsMessage;
