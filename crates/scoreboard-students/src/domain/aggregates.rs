//! Aggregate for a single student.

use scoreboard_core::error::{AggregateKind, DomainError};

/// Running statistics for one student: the sum of every score recorded and
/// how many scores went into it. Nothing else about the history is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentStats {
    score_sum: f64,
    exam_count: u64,
}

impl StudentStats {
    /// Starts a student's statistics from their first score.
    #[must_use]
    pub fn first(score: f64) -> Self {
        Self {
            score_sum: score,
            exam_count: 1,
        }
    }

    /// Folds another score into the running totals.
    pub fn add(&mut self, score: f64) {
        self.score_sum += score;
        self.exam_count += 1;
    }

    /// Sum of all recorded scores.
    #[must_use]
    pub fn score_sum(&self) -> f64 {
        self.score_sum
    }

    /// Number of recorded scores.
    #[must_use]
    pub fn exam_count(&self) -> u64 {
        self.exam_count
    }

    /// Mean of the recorded scores.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyAggregate` if no score was ever folded in,
    /// which the constructors make unreachable.
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self, student_id: &str) -> Result<f64, DomainError> {
        if self.exam_count == 0 {
            return Err(DomainError::EmptyAggregate {
                kind: AggregateKind::Student,
                key: student_id.to_owned(),
            });
        }
        Ok(self.score_sum / self.exam_count as f64)
    }
}
