use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by every collector task feeding the pipeline.
#[derive(Default)]
pub struct PipelineStats {
    received: AtomicU64,

    dispatched: AtomicU64,

    filtered: AtomicU64,

    undelivered: AtomicU64,

    /// Decode failures by error kind.
    malformed: DashMap<&'static str, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineStatsSnapshot {
    pub received: u64,
    pub dispatched: u64,
    pub filtered: u64,
    pub undelivered: u64,
    pub malformed: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_undelivered(&self) {
        self.undelivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_malformed(&self, kind: &'static str) {
        self.malformed
            .entry(kind)
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }

    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    pub fn undelivered(&self) -> u64 {
        self.undelivered.load(Ordering::Relaxed)
    }

    pub fn malformed_count(&self, kind: &str) -> u64 {
        self.malformed.get(kind).map(|c| *c).unwrap_or(0)
    }

    pub fn malformed_total(&self) -> u64 {
        self.malformed.iter().map(|entry| *entry.value()).sum()
    }

    /// Decode failure counts sorted by kind.
    pub fn malformed_by_kind(&self) -> Vec<(&'static str, u64)> {
        let mut counts: Vec<_> = self
            .malformed
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        counts.sort_unstable_by_key(|(kind, _)| *kind);
        counts
    }

    pub fn snapshot(&self) -> PipelineStatsSnapshot {
        PipelineStatsSnapshot {
            received: self.received(),
            dispatched: self.dispatched(),
            filtered: self.filtered(),
            undelivered: self.undelivered(),
            malformed: self.malformed_total(),
        }
    }
}
