use crate::services::{FilteringProcessor, OutputDispatcher, PipelineStats};
use ferrous_collector_domain::{decode_message, DnsMessage, RawDnsFrame};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Queued on every sink.
    Dispatched,
    Filtered,
    /// Dropped; carries the decode error kind.
    Malformed(&'static str),
    /// At least one sink queue was already closed.
    Undelivered,
}

/// Decode, enrich, filter and dispatch one captured payload.
pub struct ProcessDnsPayloadUseCase {
    filter: Arc<FilteringProcessor>,
    dispatcher: Arc<OutputDispatcher>,
    stats: Arc<PipelineStats>,
}

impl ProcessDnsPayloadUseCase {
    pub fn new(
        filter: Arc<FilteringProcessor>,
        dispatcher: Arc<OutputDispatcher>,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self {
            filter,
            dispatcher,
            stats,
        }
    }

    pub async fn execute(&self, frame: RawDnsFrame) -> ProcessOutcome {
        self.stats.record_received();

        let decoded = match decode_message(&frame.payload) {
            Ok(decoded) => decoded,
            Err(e) => {
                self.stats.record_malformed(e.kind());
                debug!(
                    error = %e,
                    kind = e.kind(),
                    offset = e.offset(),
                    query_ip = %frame.network.query_ip,
                    length = frame.payload.len(),
                    "Dropping malformed DNS payload"
                );
                return ProcessOutcome::Malformed(e.kind());
            }
        };

        let message = DnsMessage::from_decoded(&frame, decoded);

        if self.filter.check_if_drop(&message) {
            self.stats.record_filtered();
            return ProcessOutcome::Filtered;
        }

        match self.dispatcher.dispatch(message).await {
            Ok(()) => {
                self.stats.record_dispatched();
                ProcessOutcome::Dispatched
            }
            Err(e) => {
                self.stats.record_undelivered();
                warn!(error = %e, "DNS message not delivered to every sink");
                ProcessOutcome::Undelivered
            }
        }
    }

    pub fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }
}
