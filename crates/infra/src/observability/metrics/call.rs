//! Remote call metrics
//!
//! Counts every round trip to the accessibility service, per request kind,
//! and keeps a latency sample window for P50/P95/P99.
//!
//! ## Design
//! - **VecDeque ring buffer** of the last 1000 latencies
//! - **Poison-safe locking** with explicit match pattern (no .expect())
//! - **SeqCst ordering** for counters used in derived metrics

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axbridge_core::RequestKind;
use serde::Serialize;

use crate::observability::{MetricsError, MetricsResult};

const MAX_SAMPLES: usize = 1000;
const KIND_COUNT: usize = RequestKind::ALL.len();

/// Metrics for remote accessibility calls
#[derive(Debug)]
pub struct RemoteCallMetrics {
    total_calls: AtomicUsize,
    failed_calls: AtomicUsize,
    per_kind: [AtomicUsize; KIND_COUNT],
    start_time: Mutex<Instant>,
    /// Call latencies in microseconds (ring buffer, max 1000)
    latencies_us: Mutex<VecDeque<u64>>,
}

/// Point-in-time copy of [`RemoteCallMetrics`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteCallSnapshot {
    pub total_calls: usize,
    pub failed_calls: usize,
    /// Calls per request kind, keyed by the kind's stable name.
    pub per_kind: Vec<(&'static str, usize)>,
    pub calls_per_minute: f64,
    pub p50_us: Option<u64>,
    pub p95_us: Option<u64>,
    pub p99_us: Option<u64>,
}

impl Default for RemoteCallMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteCallMetrics {
    pub fn new() -> Self {
        Self {
            total_calls: AtomicUsize::new(0),
            failed_calls: AtomicUsize::new(0),
            per_kind: std::array::from_fn(|_| AtomicUsize::new(0)),
            start_time: Mutex::new(Instant::now()),
            latencies_us: Mutex::new(VecDeque::with_capacity(MAX_SAMPLES)),
        }
    }

    /// Record one finished remote call.
    pub fn record_call(
        &self,
        kind: RequestKind,
        elapsed: Duration,
        succeeded: bool,
    ) -> MetricsResult<()> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        self.per_kind[kind as usize].fetch_add(1, Ordering::SeqCst);
        if !succeeded {
            self.failed_calls.fetch_add(1, Ordering::SeqCst);
        }

        let us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        let mut samples = match self.latencies_us.lock() {
            Ok(guard) => guard,
            Err(poison_err) => {
                tracing::warn!(
                    metric = "RemoteCallMetrics::latencies_us",
                    "Mutex poisoned during latency recording, recovering data"
                );
                poison_err.into_inner()
            }
        };

        samples.push_back(us);
        if samples.len() > MAX_SAMPLES {
            samples.pop_front();
        }

        Ok(())
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    pub fn failed_calls(&self) -> usize {
        self.failed_calls.load(Ordering::SeqCst)
    }

    pub fn calls_of(&self, kind: RequestKind) -> usize {
        self.per_kind[kind as usize].load(Ordering::SeqCst)
    }

    /// Returns 0.0 if no time has elapsed.
    pub fn calls_per_minute(&self) -> f64 {
        let total = self.total_calls.load(Ordering::SeqCst);

        let start = match self.start_time.lock() {
            Ok(guard) => *guard,
            Err(poison_err) => {
                tracing::warn!(
                    metric = "RemoteCallMetrics::start_time",
                    "Mutex poisoned during calls_per_minute read, recovering"
                );
                *poison_err.into_inner()
            }
        };

        let elapsed = start.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            (total as f64 / elapsed) * 60.0
        } else {
            0.0
        }
    }

    /// Returns `MetricsError::EmptyData` if no samples recorded.
    pub fn p50_latency_us(&self) -> MetricsResult<u64> {
        self.percentile(0.50, "P50")
    }

    pub fn p95_latency_us(&self) -> MetricsResult<u64> {
        self.percentile(0.95, "P95")
    }

    pub fn p99_latency_us(&self) -> MetricsResult<u64> {
        self.percentile(0.99, "P99")
    }

    /// Zero every counter and drop all samples.
    pub fn reset(&self) {
        self.total_calls.store(0, Ordering::SeqCst);
        self.failed_calls.store(0, Ordering::SeqCst);
        for counter in &self.per_kind {
            counter.store(0, Ordering::SeqCst);
        }
        match self.start_time.lock() {
            Ok(mut guard) => *guard = Instant::now(),
            Err(poison_err) => *poison_err.into_inner() = Instant::now(),
        }
        match self.latencies_us.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poison_err) => poison_err.into_inner().clear(),
        }
    }

    pub fn snapshot(&self) -> RemoteCallSnapshot {
        RemoteCallSnapshot {
            total_calls: self.total_calls(),
            failed_calls: self.failed_calls(),
            per_kind: RequestKind::ALL
                .iter()
                .map(|kind| (kind.as_str(), self.calls_of(*kind)))
                .collect(),
            calls_per_minute: self.calls_per_minute(),
            p50_us: self.p50_latency_us().ok(),
            p95_us: self.p95_latency_us().ok(),
            p99_us: self.p99_latency_us().ok(),
        }
    }

    /// Holds the lock for the whole computation for a consistent snapshot.
    fn percentile(&self, percentile: f64, metric_name: &'static str) -> MetricsResult<u64> {
        let samples = match self.latencies_us.lock() {
            Ok(guard) => guard,
            Err(poison_err) => {
                tracing::warn!(
                    metric = "RemoteCallMetrics::latencies_us",
                    percentile = percentile,
                    "Mutex poisoned during percentile read, recovering"
                );
                poison_err.into_inner()
            }
        };

        if samples.is_empty() {
            return Err(MetricsError::EmptyData { metric: metric_name });
        }

        let mut sorted: Vec<u64> = samples.iter().copied().collect();
        sorted.sort_unstable();

        let index = ((sorted.len() as f64 * percentile) as usize).min(sorted.len() - 1);
        Ok(sorted[index])
    }
}
