//! Materialized exam report.

use serde::Serialize;

/// One student's score on an exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentScore {
    /// The student identifier.
    pub student_id: String,
    /// The score obtained.
    pub score: f64,
}

/// Every score recorded for an exam, in arrival order, plus their mean.
///
/// Derived from [`ExamScores`](super::aggregates::ExamScores) and always
/// reconstructable from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamReport {
    /// The exam number.
    pub exam_id: i64,
    /// Per-student scores.
    pub students: Vec<StudentScore>,
    /// Mean over `students`.
    pub average_score: f64,
}
