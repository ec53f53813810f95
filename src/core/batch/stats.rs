//! Counters shared by the submit path, the coordinator and dispatch tasks

use super::types::FlushReason;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free batching counters
#[derive(Debug, Default)]
pub struct BatchStats {
    accepted: AtomicU64,
    rejected: AtomicU64,
    batches: AtomicU64,
    size_flushes: AtomicU64,
    window_flushes: AtomicU64,
    drain_flushes: AtomicU64,
    transport_failures: AtomicU64,
    resolved: AtomicU64,
}

/// Point-in-time copy of [`BatchStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchStatsSnapshot {
    /// Calls that entered the intake
    pub accepted: u64,
    /// Calls refused because the intake was full
    pub rejected: u64,
    /// Composite calls issued
    pub batches: u64,
    pub size_flushes: u64,
    pub window_flushes: u64,
    pub drain_flushes: u64,
    /// Composite calls that failed as a whole
    pub transport_failures: u64,
    /// Calls whose single result has been written
    pub resolved: u64,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_flush(&self, reason: FlushReason) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        let counter = match reason {
            FlushReason::Size => &self.size_flushes,
            FlushReason::Window => &self.window_flushes,
            FlushReason::Drain => &self.drain_flushes,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transport_failure(&self) {
        self.transport_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_resolved(&self, count: u64) {
        self.resolved.fetch_add(count, Ordering::AcqRel);
    }

    pub fn snapshot(&self) -> BatchStatsSnapshot {
        BatchStatsSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
            size_flushes: self.size_flushes.load(Ordering::Relaxed),
            window_flushes: self.window_flushes.load(Ordering::Relaxed),
            drain_flushes: self.drain_flushes.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            resolved: self.resolved.load(Ordering::Acquire),
        }
    }
}

impl BatchStatsSnapshot {
    /// Calls accepted but not yet resolved
    pub fn in_flight(&self) -> u64 {
        self.accepted.saturating_sub(self.resolved)
    }
}
