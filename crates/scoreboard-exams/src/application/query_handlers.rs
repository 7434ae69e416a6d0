//! Query handlers for exam listings and reports.

use std::sync::Arc;

use scoreboard_core::error::DomainError;
use scoreboard_core::pagination::{Page, PageWindow, SortOrder};

use crate::application::store::{EXAM_PAGE_MAX, ExamStore};
use crate::domain::report::ExamReport;

/// Lists known exam numbers, one page at a time.
///
/// Out-of-range input is clamped (see [`PageWindow::clamped`]) and the
/// effective window is echoed in the returned page.
pub fn list_exams(skip: i64, limit: i64, order: &str, store: &ExamStore) -> Page<i64> {
    let window = PageWindow::clamped(skip, limit, SortOrder::parse(order), EXAM_PAGE_MAX);
    let (total, items) = store.list_ids(&window);
    Page::new(total, window, items)
}

/// Retrieves an exam's per-student scores and average, from the cache when
/// possible.
///
/// # Errors
///
/// Returns `DomainError::ExamNotFound` if no score was recorded for the
/// exam, or `DomainError::EmptyAggregate` on an internal consistency fault.
pub fn get_exam_report(exam_id: i64, store: &ExamStore) -> Result<Arc<ExamReport>, DomainError> {
    store
        .report_for(exam_id)?
        .ok_or(DomainError::ExamNotFound(exam_id))
}
