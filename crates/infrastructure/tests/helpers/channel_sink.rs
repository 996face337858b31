#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_collector_application::ports::MessageSink;
use ferrous_collector_application::services::{
    FilteringProcessor, OutputDispatcher, PipelineStats, SinkWorker,
};
use ferrous_collector_application::use_cases::ProcessDnsPayloadUseCase;
use ferrous_collector_domain::config::FilteringConfig;
use ferrous_collector_domain::{DnsMessage, DomainError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Forwards every written message to a test-side receiver.
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<DnsMessage>,
}

#[async_trait]
impl MessageSink for ChannelSink {
    fn name(&self) -> &str {
        "channel"
    }

    async fn write(&mut self, message: &DnsMessage) -> Result<(), DomainError> {
        let _ = self.sender.send(message.clone());
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        Ok(())
    }
}

pub struct TestPipeline {
    pub use_case: Arc<ProcessDnsPayloadUseCase>,
    pub dispatcher: Arc<OutputDispatcher>,
    pub stats: Arc<PipelineStats>,
    pub received: mpsc::UnboundedReceiver<DnsMessage>,
}

impl TestPipeline {
    pub fn new() -> Self {
        let (sender, received) = mpsc::unbounded_channel();
        let dispatcher = Arc::new(OutputDispatcher::new(vec![SinkWorker::spawn(
            Box::new(ChannelSink { sender }),
            64,
        )]));
        let stats = Arc::new(PipelineStats::new());
        let use_case = Arc::new(ProcessDnsPayloadUseCase::new(
            Arc::new(FilteringProcessor::new(&FilteringConfig::default())),
            Arc::clone(&dispatcher),
            Arc::clone(&stats),
        ));
        Self {
            use_case,
            dispatcher,
            stats,
            received,
        }
    }

    pub async fn next_message(&mut self) -> DnsMessage {
        tokio::time::timeout(Duration::from_secs(5), self.received.recv())
            .await
            .expect("timed out waiting for a delivered message")
            .expect("delivery channel closed")
    }
}
