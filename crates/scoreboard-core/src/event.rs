//! The score event handed to the aggregate stores.

use serde::Serialize;

use crate::error::DomainError;

/// One student's score on one exam.
///
/// Constructed only through [`ScoreEvent::new`], which rejects input the
/// stores must never see. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEvent {
    student_id: String,
    exam_id: i64,
    score: f64,
}

impl ScoreEvent {
    /// Builds a validated score event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `student_id` is empty or blank,
    /// or if `score` is NaN or infinite.
    pub fn new(student_id: impl Into<String>, exam_id: i64, score: f64) -> Result<Self, DomainError> {
        let student_id = student_id.into();
        if student_id.trim().is_empty() {
            return Err(DomainError::Validation("student id must not be empty".into()));
        }
        if !score.is_finite() {
            return Err(DomainError::Validation(format!(
                "score for student {student_id} on exam {exam_id} must be finite, got {score}"
            )));
        }
        Ok(Self {
            student_id,
            exam_id,
            score,
        })
    }

    /// The student who took the exam.
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// The exam number.
    #[must_use]
    pub fn exam_id(&self) -> i64 {
        self.exam_id
    }

    /// The score obtained.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}
