//! Logger metrics for observability
//!
//! Submission calls never report failures, so these counters are the only
//! way to see how many entries reached the file and how many did not.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_queue_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_written();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.lines_written(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines appended to the log file, separators included
    lines_written: AtomicU64,

    /// Entries skipped because their priority exceeded the threshold
    filtered_count: AtomicU64,

    /// Entries lost to queue failures, exhausted retries or shutdown
    dropped_count: AtomicU64,

    /// Append attempts that failed and were retried
    write_retries: AtomicU64,

    /// Items whose handling panicked on the worker
    handling_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            write_retries: AtomicU64::new(0),
            handling_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_retries(&self) -> u64 {
        self.write_retries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handling_failures(&self) -> u64 {
        self.handling_failures.load(Ordering::Relaxed)
    }

    /// Record a written line; returns the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record several dropped entries at once
    #[inline]
    pub fn record_dropped_many(&self, count: u64) -> u64 {
        self.dropped_count.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_retries(&self, retries: u64) -> u64 {
        self.write_retries.fetch_add(retries, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handling_failure(&self) -> u64 {
        self.handling_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written or dropped yet.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.lines_written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.lines_written.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
        self.write_retries.store(0, Ordering::Relaxed);
        self.handling_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            lines_written: AtomicU64::new(self.lines_written()),
            filtered_count: AtomicU64::new(self.filtered_count()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            write_retries: AtomicU64::new(self.write_retries()),
            handling_failures: AtomicU64::new(self.handling_failures()),
        }
    }
}
