//! Shared, process-wide student store.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use scoreboard_core::error::DomainError;
use scoreboard_core::event::ScoreEvent;
use scoreboard_core::pagination::PageWindow;
use scoreboard_core::projection::ScoreProjection;
use tracing::{debug, error};

use crate::domain::aggregates::StudentStats;

/// Maximum number of students returned in one page.
pub const STUDENT_PAGE_MAX: usize = 100;

/// Student aggregates keyed by student id, in lexicographic order.
#[derive(Debug, Default)]
pub struct StudentStore {
    students: RwLock<BTreeMap<String, StudentStats>>,
}

impl StudentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the event's score to the student's running totals, creating
    /// them on the student's first score.
    pub fn record(&self, event: &ScoreEvent) {
        let mut students = self.students.write().unwrap_or_else(PoisonError::into_inner);
        match students.get_mut(event.student_id()) {
            Some(stats) => stats.add(event.score()),
            None => {
                students.insert(event.student_id().to_owned(), StudentStats::first(event.score()));
            }
        }
        debug!(student_id = event.student_id(), "recorded student score");
    }

    /// Returns the student's average score, or `None` for an unknown
    /// student.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyAggregate` if the student is known but has
    /// no scores, which indicates a bug.
    pub fn average_for(&self, student_id: &str) -> Result<Option<f64>, DomainError> {
        let students = self.students.read().unwrap_or_else(PoisonError::into_inner);
        let Some(stats) = students.get(student_id) else {
            return Ok(None);
        };
        stats.average(student_id).map(Some).inspect_err(|err| {
            error!(%err, "student aggregate without scores");
        })
    }

    /// Returns the total number of known students and the ids inside the
    /// window. Both are read under the same guard.
    pub fn list_ids(&self, window: &PageWindow) -> (usize, Vec<String>) {
        let students = self.students.read().unwrap_or_else(PoisonError::into_inner);
        (students.len(), window.apply(students.keys().cloned()))
    }

    /// Number of known students.
    pub fn len(&self) -> usize {
        self.students.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no score has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScoreProjection for StudentStore {
    fn name(&self) -> &'static str {
        "students"
    }

    fn record(&self, event: &ScoreEvent) {
        StudentStore::record(self, event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use scoreboard_core::pagination::SortOrder;
    use scoreboard_test_support::score_event;

    use super::*;

    #[test]
    fn test_record_creates_then_accumulates() {
        // Arrange
        let store = StudentStore::new();

        // Act
        store.record(&score_event("John.Doe", 1, 0.4));
        store.record(&score_event("John.Doe", 2, 0.8));

        // Assert
        assert_eq!(store.len(), 1);
        let average = store.average_for("John.Doe").unwrap().unwrap();
        assert!((average - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_average_for_unknown_student_is_none() {
        let store = StudentStore::new();
        store.record(&score_event("Jane.Doe", 1, 0.9));

        assert_eq!(store.average_for("Nobody").unwrap(), None);
    }

    #[test]
    fn test_list_ids_orders_lexicographically() {
        // Arrange
        let store = StudentStore::new();
        for id in ["Mallory", "Alice", "bob", "Carol"] {
            store.record(&score_event(id, 1, 0.5));
        }

        // Act
        let (total, asc) = store.list_ids(&PageWindow::clamped(0, 10, SortOrder::Asc, STUDENT_PAGE_MAX));
        let (_, desc) = store.list_ids(&PageWindow::clamped(0, 2, SortOrder::Desc, STUDENT_PAGE_MAX));

        // Assert
        assert_eq!(total, 4);
        assert_eq!(asc, vec!["Alice", "Carol", "Mallory", "bob"]);
        assert_eq!(desc, vec!["bob", "Mallory"]);
    }

    #[test]
    fn test_total_is_independent_of_window() {
        let store = StudentStore::new();
        for i in 0..7 {
            store.record(&score_event(&format!("student-{i}"), 1, 0.5));
        }

        let (small, _) = store.list_ids(&PageWindow::clamped(5, 1, SortOrder::Asc, STUDENT_PAGE_MAX));
        let (large, items) = store.list_ids(&PageWindow::clamped(100, 100, SortOrder::Asc, STUDENT_PAGE_MAX));

        assert_eq!(small, 7);
        assert_eq!(large, 7);
        assert!(items.is_empty());
    }

    #[test]
    fn test_concurrent_records_lose_no_updates() {
        // Arrange
        let store = Arc::new(StudentStore::new());
        let writers = 8;
        let per_writer = 250;

        // Act
        thread::scope(|scope| {
            for _ in 0..writers {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for exam in 0..per_writer {
                        store.record(&score_event("Busy.Student", exam, 1.0));
                    }
                });
            }
        });

        // Assert
        let stats = *store.students.read().unwrap().get("Busy.Student").unwrap();
        assert_eq!(stats.exam_count(), (writers * per_writer) as u64);
        assert_eq!(store.average_for("Busy.Student").unwrap(), Some(1.0));
    }
}
