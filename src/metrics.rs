//! Write, rejection and error counters

use metrics::counter;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ValidationError;

/// Metric name for accepted writes
pub const WRITES_TOTAL: &str = "blog_store_writes_total";
/// Metric name for rejected candidates
pub const VALIDATION_FAILURES_TOTAL: &str = "blog_store_validation_failures_total";
/// Metric name for writes rejected by a uniqueness conflict in the store
pub const CONFLICTS_TOTAL: &str = "blog_store_conflicts_total";
/// Metric name for storage failures
pub const ERRORS_TOTAL: &str = "blog_store_errors_total";

/// Point-in-time copy of the collector's counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub writes_total: u64,
    pub validation_failures_total: u64,
    pub conflicts_total: u64,
    pub errors_total: u64,
}

/// Metrics collection and management
///
/// Each record call feeds the global `metrics` recorder and a local count.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    writes_total: AtomicU64,
    validation_failures_total: AtomicU64,
    conflicts_total: AtomicU64,
    errors_total: AtomicU64,
}

impl MetricsCollector {
    /// Record an accepted create, update or delete
    pub fn record_write(&self, entity: &'static str, operation: &'static str) {
        counter!(WRITES_TOTAL, "entity" => entity, "operation" => operation).increment(1);
        self.writes_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected candidate
    pub fn record_validation_failure(&self, entity: &'static str, error: &ValidationError) {
        if matches!(error, ValidationError::NotUnique { .. }) {
            counter!(CONFLICTS_TOTAL, "entity" => entity, "field" => error.field()).increment(1);
            self.conflicts_total.fetch_add(1, Ordering::Relaxed);
        }
        counter!(
            VALIDATION_FAILURES_TOTAL,
            "entity" => entity,
            "field" => error.field(),
            "rule" => error.rule()
        )
        .increment(1);
        self.validation_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a storage failure
    pub fn record_error(&self, entity: &'static str, operation: &'static str) {
        counter!(ERRORS_TOTAL, "entity" => entity, "operation" => operation).increment(1);
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Current counts
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            writes_total: self.writes_total.load(Ordering::Relaxed),
            validation_failures_total: self.validation_failures_total.load(Ordering::Relaxed),
            conflicts_total: self.conflicts_total.load(Ordering::Relaxed),
            errors_total: self.errors_total.load(Ordering::Relaxed),
        }
    }
}
