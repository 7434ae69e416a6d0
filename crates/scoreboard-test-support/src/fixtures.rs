//! Event fixtures.

use scoreboard_core::event::ScoreEvent;

/// Builds a valid score event.
///
/// # Panics
///
/// Panics if the arguments fail validation; fixtures are expected to be
/// valid.
#[must_use]
pub fn score_event(student_id: &str, exam_id: i64, score: f64) -> ScoreEvent {
    ScoreEvent::new(student_id, exam_id, score)
        .unwrap_or_else(|err| panic!("invalid score fixture {student_id}/{exam_id}: {err}"))
}
