#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_collector_application::ports::MessageSink;
use ferrous_collector_domain::{DnsMessage, DomainError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Shared view on what a [`MockSink`] received.
#[derive(Clone, Default)]
pub struct SinkRecorder {
    qnames: Arc<Mutex<Vec<String>>>,
    flushes: Arc<AtomicUsize>,
    closed: Arc<AtomicBool>,
}

impl SinkRecorder {
    pub fn qnames(&self) -> Vec<String> {
        self.qnames.lock().unwrap().clone()
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct MockSink {
    name: String,
    recorder: SinkRecorder,
    fail_writes: bool,
    flush_interval: Option<Duration>,
    gate: Option<Arc<Semaphore>>,
}

impl MockSink {
    pub fn new(name: &str) -> (Self, SinkRecorder) {
        let recorder = SinkRecorder::default();
        let sink = Self {
            name: name.to_string(),
            recorder: recorder.clone(),
            fail_writes: false,
            flush_interval: None,
            gate: None,
        };
        (sink, recorder)
    }

    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = Some(interval);
        self
    }

    /// Every write waits for one permit of `gate`.
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn boxed(self) -> Box<dyn MessageSink> {
        Box::new(self)
    }
}

#[async_trait]
impl MessageSink for MockSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&mut self, message: &DnsMessage) -> Result<(), DomainError> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if self.fail_writes {
            return Err(DomainError::SinkWrite {
                sink: self.name.clone(),
                reason: "mock failure".to_string(),
            });
        }
        self.recorder
            .qnames
            .lock()
            .unwrap()
            .push(message.dns.qname.clone());
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), DomainError> {
        self.recorder.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        self.recorder.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn flush_interval(&self) -> Option<Duration> {
        self.flush_interval
    }
}
