//! Pipeline metrics for observability
//!
//! Counters for queue pressure, delivery and sink health. All counters use
//! relaxed atomics; they are statistics, not synchronization.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for pipeline observability
///
/// # Example
///
/// ```
/// use logpipe::PipelineMetrics;
///
/// let metrics = PipelineMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_evicted(1);
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.evicted(), 1);
/// ```
#[derive(Debug)]
pub struct PipelineMetrics {
    /// Entries accepted into the queue
    enqueued: AtomicU64,

    /// Entries removed from the head of a full queue
    evicted: AtomicU64,

    /// Entries refused because the pipeline had already shut down
    rejected: AtomicU64,

    /// Entries handed to every sink
    dispatched: AtomicU64,

    write_failures: AtomicU64,
    flush_failures: AtomicU64,

    /// Times a worker thread was spawned
    worker_starts: AtomicU64,
}

impl PipelineMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
            worker_starts: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn worker_starts(&self) -> u64 {
        self.worker_starts.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    /// Record `count` evictions caused by a single enqueue
    #[inline]
    pub fn record_evicted(&self, count: usize) -> u64 {
        self.evicted.fetch_add(count as u64, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush_failure(&self) -> u64 {
        self.flush_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_worker_start(&self) -> u64 {
        self.worker_starts.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of accepted entries that were later evicted (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been enqueued.
    pub fn eviction_rate(&self) -> f64 {
        let enqueued = self.enqueued() as f64;
        if enqueued == 0.0 {
            0.0
        } else {
            (self.evicted() as f64 / enqueued) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.evicted.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.flush_failures.store(0, Ordering::Relaxed);
        self.worker_starts.store(0, Ordering::Relaxed);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PipelineMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            evicted: AtomicU64::new(self.evicted()),
            rejected: AtomicU64::new(self.rejected()),
            dispatched: AtomicU64::new(self.dispatched()),
            write_failures: AtomicU64::new(self.write_failures()),
            flush_failures: AtomicU64::new(self.flush_failures()),
            worker_starts: AtomicU64::new(self.worker_starts()),
        }
    }
}
