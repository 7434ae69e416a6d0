//! Shared, process-wide exam store.
//!
//! Exam aggregates and the report cache sit behind one lock. A write
//! appends and invalidates under a single write guard, so no reader can
//! see the new score without also seeing the cache entry gone. A read
//! that misses computes under a read guard and only populates the cache
//! if the exam has not grown in between; a population that loses that
//! race is dropped.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use scoreboard_core::error::DomainError;
use scoreboard_core::event::ScoreEvent;
use scoreboard_core::pagination::PageWindow;
use scoreboard_core::projection::ScoreProjection;
use tracing::{debug, error};

use crate::application::report_cache::{CachePolicy, ReportCache, ReportStats};
use crate::domain::aggregates::ExamScores;
use crate::domain::report::ExamReport;

/// Maximum number of exams returned in one page.
pub const EXAM_PAGE_MAX: usize = 50;

#[derive(Debug, Default)]
struct ExamState {
    exams: BTreeMap<i64, ExamScores>,
    cache: ReportCache,
}

/// Result of the read-guarded half of [`ExamStore::report_for`].
#[derive(Debug)]
enum Lookup {
    Unknown,
    Cached(Arc<ExamReport>),
    Computed {
        report: Arc<ExamReport>,
        observed_len: usize,
    },
}

/// Exam aggregates keyed by exam number, in numeric order.
#[derive(Debug, Default)]
pub struct ExamStore {
    state: RwLock<ExamState>,
    policy: CachePolicy,
    stats: ReportStats,
}

impl ExamStore {
    /// Creates an empty store with report caching enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::Enabled)
    }

    /// Creates an empty store with the given cache policy.
    #[must_use]
    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            state: RwLock::new(ExamState {
                exams: BTreeMap::new(),
                cache: ReportCache::new(policy),
            }),
            policy,
            stats: ReportStats::default(),
        }
    }

    /// Appends the event's score to its exam and drops any cached report
    /// for that exam, as one step.
    pub fn record(&self, event: &ScoreEvent) {
        let exam_id = event.exam_id();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state
            .exams
            .entry(exam_id)
            .and_modify(|scores| scores.push(event.student_id(), event.score()))
            .or_insert_with(|| ExamScores::first(event.student_id(), event.score()));
        if state.cache.invalidate(exam_id) {
            self.stats.record_invalidation();
        }
        drop(state);
        debug!(exam_id, student_id = event.student_id(), "recorded exam score");
    }

    /// Returns the report for the exam, or `None` for an unknown exam.
    ///
    /// A cached report is returned as is. Otherwise the report is computed
    /// from every score recorded so far and cached for later reads.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyAggregate` if the exam is known but has
    /// no scores, which indicates a bug.
    pub fn report_for(&self, exam_id: i64) -> Result<Option<Arc<ExamReport>>, DomainError> {
        match self.lookup(exam_id)? {
            Lookup::Unknown => Ok(None),
            Lookup::Cached(report) => Ok(Some(report)),
            Lookup::Computed { report, .. } if self.policy == CachePolicy::Disabled => Ok(Some(report)),
            Lookup::Computed { report, observed_len } => {
                Ok(Some(self.populate_if_unchanged(exam_id, report, observed_len)))
            }
        }
    }

    /// Serves a hit, or computes the report, under one read guard.
    fn lookup(&self, exam_id: i64) -> Result<Lookup, DomainError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = state.cache.get(exam_id) {
            self.stats.record_hit();
            return Ok(Lookup::Cached(cached));
        }
        let Some(scores) = state.exams.get(&exam_id) else {
            return Ok(Lookup::Unknown);
        };
        let report = scores.compute_report(exam_id).inspect_err(|err| {
            error!(%err, "exam aggregate without scores");
        })?;
        self.stats.record_computation();
        Ok(Lookup::Computed {
            report: Arc::new(report),
            observed_len: scores.len(),
        })
    }

    /// Caches `report` only if the exam still holds `observed_len` scores.
    /// A report overtaken by a write is returned without being cached.
    fn populate_if_unchanged(
        &self,
        exam_id: i64,
        report: Arc<ExamReport>,
        observed_len: usize,
    ) -> Arc<ExamReport> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let current_len = state.exams.get(&exam_id).map(ExamScores::len);
        if current_len == Some(observed_len) {
            state.cache.populate(exam_id, report)
        } else {
            drop(state);
            self.stats.record_discarded_population();
            debug!(exam_id, observed_len, ?current_len, "exam changed while computing report, not caching");
            report
        }
    }

    /// Returns the total number of known exams and the exam numbers inside
    /// the window. Both are read under the same guard.
    pub fn list_ids(&self, window: &PageWindow) -> (usize, Vec<i64>) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        (state.exams.len(), window.apply(state.exams.keys().copied()))
    }

    /// Number of known exams.
    pub fn len(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).exams.len()
    }

    /// Returns `true` if no score has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cache policy this store was built with.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Counters describing how reads were served.
    pub fn stats(&self) -> &ReportStats {
        &self.stats
    }
}

impl ScoreProjection for ExamStore {
    fn name(&self) -> &'static str {
        "exams"
    }

    fn record(&self, event: &ScoreEvent) {
        ExamStore::record(self, event);
    }
}
