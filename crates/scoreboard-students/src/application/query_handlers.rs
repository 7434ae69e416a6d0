//! Query handlers for student listings and reports.
//!
//! Handlers hold no state of their own; they clamp caller input, delegate
//! to the [`StudentStore`] and shape the result into a view.

use scoreboard_core::error::DomainError;
use scoreboard_core::pagination::{Page, PageWindow, SortOrder};
use serde::Serialize;

use crate::application::store::{STUDENT_PAGE_MAX, StudentStore};

/// Read-only view of a student's report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReportView {
    /// The student identifier.
    pub student_id: String,
    /// Mean of every score recorded for the student.
    pub average_score: f64,
}

/// Lists known student ids, one page at a time.
///
/// Out-of-range input is clamped (see [`PageWindow::clamped`]) and the
/// effective window is echoed in the returned page.
pub fn list_students(skip: i64, limit: i64, order: &str, store: &StudentStore) -> Page<String> {
    let window = PageWindow::clamped(skip, limit, SortOrder::parse(order), STUDENT_PAGE_MAX);
    let (total, items) = store.list_ids(&window);
    Page::new(total, window, items)
}

/// Retrieves a student's average score.
///
/// # Errors
///
/// Returns `DomainError::StudentNotFound` if no score was recorded for the
/// student, or `DomainError::EmptyAggregate` on an internal consistency
/// fault.
pub fn get_student_report(student_id: &str, store: &StudentStore) -> Result<StudentReportView, DomainError> {
    let average_score = store
        .average_for(student_id)?
        .ok_or_else(|| DomainError::StudentNotFound(student_id.to_owned()))?;
    Ok(StudentReportView {
        student_id: student_id.to_owned(),
        average_score,
    })
}
