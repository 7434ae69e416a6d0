//! Shared application state.

use std::sync::Arc;

use scoreboard_exams::application::store::ExamStore;
use scoreboard_ingest::pipeline::Ingestor;
use scoreboard_students::application::store::StudentStore;

/// Application state shared across all request handlers.
///
/// The stores are created once at startup and live for the whole process.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Per-student running averages.
    pub students: Arc<StudentStore>,
    /// Per-exam scores and cached reports.
    pub exams: Arc<ExamStore>,
    /// The ingestion pipeline feeding both stores.
    pub ingestor: Arc<Ingestor>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(students: Arc<StudentStore>, exams: Arc<ExamStore>, ingestor: Arc<Ingestor>) -> Self {
        Self {
            students,
            exams,
            ingestor,
        }
    }
}
