//! Aggregate for a single exam.

use scoreboard_core::error::{AggregateKind, DomainError};

use super::report::{ExamReport, StudentScore};

/// Append-only list of every score recorded for one exam.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamScores {
    entries: Vec<StudentScore>,
}

impl ExamScores {
    /// Starts an exam's list from its first score.
    #[must_use]
    pub fn first(student_id: &str, score: f64) -> Self {
        let mut scores = Self::default();
        scores.push(student_id, score);
        scores
    }

    /// Appends a score.
    pub fn push(&mut self, student_id: &str, score: f64) {
        self.entries.push(StudentScore {
            student_id: student_id.to_owned(),
            score,
        });
    }

    /// Recorded scores in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[StudentScore] {
        &self.entries
    }

    /// Number of recorded scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the report for this exam by walking every entry once.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyAggregate` if the list is empty, which the
    /// constructors make unreachable.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute_report(&self, exam_id: i64) -> Result<ExamReport, DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyAggregate {
                kind: AggregateKind::Exam,
                key: exam_id.to_string(),
            });
        }

        let mut score_sum = 0.0;
        let mut students = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            score_sum += entry.score;
            students.push(entry.clone());
        }

        Ok(ExamReport {
            exam_id,
            average_score: score_sum / students.len() as f64,
            students,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_report_averages_three_students() {
        // Arrange
        let mut scores = ExamScores::first("John.Doe", 0.722_509_585_163_546_6);
        scores.push("Jane.Doe", 0.659_299_572_219_434_1);
        scores.push("Dohn.Joe", 0.908_556_805_008_296_4);

        // Act
        let report = scores.compute_report(1000).unwrap();

        // Assert
        assert_eq!(report.exam_id, 1000);
        assert_eq!(report.students.len(), 3);
        assert_eq!(report.students[0].student_id, "John.Doe");
        assert_eq!(report.students[2].student_id, "Dohn.Joe");
        assert!((report.average_score - 0.763_455_320_797_092_4).abs() < 1e-12);
    }

    #[test]
    fn test_compute_report_keeps_repeat_attempts() {
        let mut scores = ExamScores::first("John.Doe", 0.2);
        scores.push("John.Doe", 0.4);

        let report = scores.compute_report(5).unwrap();

        assert_eq!(report.students.len(), 2);
        assert!((report.average_score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_compute_report_of_empty_list_is_internal_fault() {
        let scores = ExamScores::default();

        match scores.compute_report(9).unwrap_err() {
            DomainError::EmptyAggregate { kind, key } => {
                assert_eq!(kind, AggregateKind::Exam);
                assert_eq!(key, "9");
            }
            other => panic!("expected EmptyAggregate, got {other:?}"),
        }
    }
}
