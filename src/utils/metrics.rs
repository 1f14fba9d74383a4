//! Codec Metrics
//!
//! Process-wide counters for decode and encode activity.
//!
//! Uses atomic counters for thread-safe collection; readers take a
//! [`MetricsSnapshot`] and never block writers.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;

/// Counters for codec operations
#[derive(Debug)]
pub struct CodecMetrics {
    /// Top-level records decoded
    pub records_decoded: AtomicU64,
    /// Bytes consumed by successful decodes
    pub bytes_decoded: AtomicU64,
    /// Top-level records encoded
    pub records_encoded: AtomicU64,
    /// Bytes produced by encodes
    pub bytes_encoded: AtomicU64,
    /// Decodes that returned an error
    pub decode_failures: AtomicU64,
    /// Calls rejected because the type is one-directional
    pub unsupported_calls: AtomicU64,
    /// Property tags written without a value encoding
    pub unknown_tags: AtomicU64,
    start_time: Instant,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self {
            records_decoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            records_encoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            decode_failures: AtomicU64::new(0),
            unsupported_calls: AtomicU64::new(0),
            unknown_tags: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a successful decode of `byte_count` bytes
    pub fn record_decoded(&self, byte_count: usize) {
        self.records_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded
            .fetch_add(byte_count as u64, Ordering::Relaxed);
    }

    /// Record an encode that produced `byte_count` bytes
    pub fn record_encoded(&self, byte_count: usize) {
        self.records_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded
            .fetch_add(byte_count as u64, Ordering::Relaxed);
    }

    pub fn decode_failed(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unsupported_direction(&self) {
        self.unsupported_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unknown_tag_passed(&self) {
        self.unknown_tags.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_decoded: self.records_decoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            records_encoded: self.records_encoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            unsupported_calls: self.unsupported_calls.load(Ordering::Relaxed),
            unknown_tags: self.unknown_tags.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current counters at info level
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            records_decoded = snapshot.records_decoded,
            bytes_decoded = snapshot.bytes_decoded,
            records_encoded = snapshot.records_encoded,
            bytes_encoded = snapshot.bytes_encoded,
            decode_failures = snapshot.decode_failures,
            unsupported_calls = snapshot.unsupported_calls,
            unknown_tags = snapshot.unknown_tags,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter values at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_decoded: u64,
    pub bytes_decoded: u64,
    pub records_encoded: u64,
    pub bytes_encoded: u64,
    pub decode_failures: u64,
    pub unsupported_calls: u64,
    pub unknown_tags: u64,
    pub uptime_seconds: u64,
}

static METRICS: OnceLock<CodecMetrics> = OnceLock::new();

/// The process-wide metrics instance
pub fn global() -> &'static CodecMetrics {
    METRICS.get_or_init(CodecMetrics::new)
}
