//! Memoized exam reports.
//!
//! The cache is a pure memoization layer: it never holds anything that
//! cannot be recomputed from the exam aggregates, and disabling it changes
//! only how much work a read does. It is owned by the exam store and only
//! touched under the store's lock, so it carries no locking of its own.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::domain::report::ExamReport;

/// Whether computed reports are kept between reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep a report until the next score for its exam arrives.
    #[default]
    Enabled,
    /// Recompute on every read.
    Disabled,
}

impl CachePolicy {
    /// Maps a boolean switch onto a policy.
    #[must_use]
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

/// At most one report per exam, unbounded, with no time-based expiry.
#[derive(Debug, Default)]
pub struct ReportCache {
    policy: CachePolicy,
    entries: HashMap<i64, Arc<ExamReport>>,
}

impl ReportCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    /// The configured policy.
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the cached report for the exam.
    #[must_use]
    pub fn get(&self, exam_id: i64) -> Option<Arc<ExamReport>> {
        self.entries.get(&exam_id).cloned()
    }

    /// Stores a report unless one is already present, and returns the
    /// report now held for the exam. With caching disabled nothing is
    /// stored and `report` is handed back.
    pub fn populate(&mut self, exam_id: i64, report: Arc<ExamReport>) -> Arc<ExamReport> {
        match self.policy {
            CachePolicy::Enabled => Arc::clone(self.entries.entry(exam_id).or_insert(report)),
            CachePolicy::Disabled => report,
        }
    }

    /// Drops the report for the exam. Returns `true` if one was cached.
    pub fn invalidate(&mut self, exam_id: i64) -> bool {
        self.entries.remove(&exam_id).is_some()
    }

    /// Number of cached reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters describing how exam reads were served.
#[derive(Debug, Default)]
pub struct ReportStats {
    hits: AtomicU64,
    computations: AtomicU64,
    invalidations: AtomicU64,
    discarded_populations: AtomicU64,
}

impl ReportStats {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_computation(&self) {
        self.computations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_discarded_population(&self) {
        self.discarded_populations.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Reports computed from the aggregates, one per read of a known exam
    /// that found nothing cached.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Cached reports dropped because a new score arrived.
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }

    /// Computed reports not cached because a write overtook them.
    pub fn discarded_populations(&self) -> u64 {
        self.discarded_populations.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> ReportStatsSnapshot {
        ReportStatsSnapshot {
            hits: self.hits(),
            computations: self.computations(),
            invalidations: self.invalidations(),
            discarded_populations: self.discarded_populations(),
        }
    }
}

/// Serializable copy of [`ReportStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatsSnapshot {
    /// Reads served from the cache.
    pub hits: u64,
    /// Reports computed.
    pub computations: u64,
    /// Cached reports dropped by new scores.
    pub invalidations: u64,
    /// Populations abandoned after losing a race with a write.
    pub discarded_populations: u64,
}
