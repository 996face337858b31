use crate::ports::MessageSink;
use ferrous_collector_domain::{DnsMessage, DomainError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// What one sink worker did before it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    pub sink: String,
    pub written: u64,
    pub failed: u64,
}

/// A sink driven by its own task behind a bounded queue.
pub struct SinkWorker {
    name: String,
    sender: mpsc::Sender<Arc<DnsMessage>>,
    handle: JoinHandle<SinkReport>,
}

impl SinkWorker {
    /// Spawns the delivery loop for `sink` with a queue of `capacity` messages.
    pub fn spawn(sink: Box<dyn MessageSink>, capacity: usize) -> Self {
        let name = sink.name().to_string();
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(delivery_loop(sink, receiver));

        debug!(sink = %name, capacity, "SinkWorker: started");

        Self {
            name,
            sender,
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

async fn delivery_loop(
    mut sink: Box<dyn MessageSink>,
    mut receiver: mpsc::Receiver<Arc<DnsMessage>>,
) -> SinkReport {
    let mut report = SinkReport {
        sink: sink.name().to_string(),
        written: 0,
        failed: 0,
    };
    let mut ticker = sink.flush_interval().map(flush_ticker);
    let mut dirty = false;

    loop {
        tokio::select! {
            maybe_message = receiver.recv() => {
                match maybe_message {
                    Some(message) => {
                        match sink.write(&message).await {
                            Ok(()) => report.written += 1,
                            Err(e) => {
                                report.failed += 1;
                                warn!(sink = %report.sink, error = %e, "SinkWorker: write failed, message dropped");
                            }
                        }
                        dirty = true;
                    }
                    None => break,
                }
            }
            _ = next_tick(&mut ticker), if dirty => {
                if let Err(e) = sink.flush().await {
                    warn!(sink = %report.sink, error = %e, "SinkWorker: periodic flush failed");
                }
                dirty = false;
            }
        }
    }

    if let Err(e) = sink.flush().await {
        error!(sink = %report.sink, error = %e, "SinkWorker: final flush failed");
    }
    if let Err(e) = sink.close().await {
        error!(sink = %report.sink, error = %e, "SinkWorker: close failed");
    }

    info!(
        sink = %report.sink,
        written = report.written,
        failed = report.failed,
        "SinkWorker: queue drained, sink closed"
    );

    report
}

fn flush_ticker(period: Duration) -> Interval {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

struct SinkQueue {
    name: String,
    sender: mpsc::Sender<Arc<DnsMessage>>,
}

/// Fans every message out to all sink workers.
///
/// A full queue makes `dispatch` wait, so a slow sink slows the producers
/// instead of growing memory.
pub struct OutputDispatcher {
    queues: RwLock<Option<Vec<SinkQueue>>>,
    workers: Mutex<Vec<(String, JoinHandle<SinkReport>)>>,
}

impl OutputDispatcher {
    pub fn new(workers: Vec<SinkWorker>) -> Self {
        let mut queues = Vec::with_capacity(workers.len());
        let mut handles = Vec::with_capacity(workers.len());

        for worker in workers {
            queues.push(SinkQueue {
                name: worker.name.clone(),
                sender: worker.sender,
            });
            handles.push((worker.name, worker.handle));
        }

        Self {
            queues: RwLock::new(Some(queues)),
            workers: Mutex::new(handles),
        }
    }

    /// Queues `message` on every sink.
    ///
    /// Every sink is attempted; the error names the last sink whose queue
    /// was gone.
    pub async fn dispatch(&self, message: DnsMessage) -> Result<(), DomainError> {
        let guard = self.queues.read().await;
        let Some(queues) = guard.as_ref() else {
            return Err(DomainError::QueueClosed("dispatcher".to_string()));
        };

        let message = Arc::new(message);
        let mut result = Ok(());

        for queue in queues {
            if queue.sender.send(Arc::clone(&message)).await.is_err() {
                warn!(sink = %queue.name, "OutputDispatcher: delivery queue closed, message dropped");
                result = Err(DomainError::QueueClosed(queue.name.clone()));
            }
        }

        result
    }

    /// Closes every queue and waits until each worker has drained, flushed
    /// and closed its sink. Later calls to `dispatch` fail.
    pub async fn shutdown(&self) -> Vec<SinkReport> {
        self.queues.write().await.take();

        let workers = std::mem::take(&mut *self.workers.lock().await);
        let mut reports = Vec::with_capacity(workers.len());

        for (name, handle) in workers {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!(sink = %name, error = %e, "OutputDispatcher: delivery worker terminated abnormally");
                }
            }
        }

        reports
    }
}
