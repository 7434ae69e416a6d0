//! Domain error types.

use std::fmt;

use thiserror::Error;

/// Which kind of aggregate an [`DomainError::EmptyAggregate`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    /// A per-student running average.
    Student,
    /// A per-exam score list.
    Exam,
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => f.write_str("student"),
            Self::Exam => f.write_str("exam"),
        }
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An incoming score failed boundary validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// No scores have been recorded for the student.
    #[error("student not found: {0}")]
    StudentNotFound(String),

    /// No scores have been recorded for the exam.
    #[error("exam not found: {0}")]
    ExamNotFound(i64),

    /// An aggregate exists but holds no scores.
    ///
    /// Aggregates are only created together with their first score, so this
    /// is an internal consistency fault rather than a lookup miss.
    #[error("internal consistency fault: {kind} aggregate {key} exists with no scores")]
    EmptyAggregate {
        /// The kind of aggregate.
        kind: AggregateKind,
        /// The aggregate key, rendered for diagnostics.
        key: String,
    },
}

impl DomainError {
    /// Returns `true` for faults that indicate a bug rather than bad input
    /// or an unknown key.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::EmptyAggregate { .. })
    }
}
