//! Fan-out of validated scores to the aggregate stores.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use scoreboard_core::clock::Clock;
use scoreboard_core::event::ScoreEvent;
use scoreboard_core::projection::ScoreProjection;
use serde::Serialize;
use tracing::{trace, warn};

use crate::payload::parse_score;
use crate::sse::SseFrame;

/// Event type of frames that carry a score.
pub const SCORE_EVENT_TYPE: &str = "score";

/// What happened to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Parsed, validated and recorded by every projection.
    Accepted,
    /// Not a `score` frame.
    Skipped,
    /// A `score` frame that failed to parse or validate.
    Rejected,
}

/// Point-in-time ingestion counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestStatus {
    /// Scores recorded.
    pub accepted: u64,
    /// Score frames dropped as malformed or invalid.
    pub rejected: u64,
    /// Frames of other event types.
    pub skipped: u64,
    /// When the last score was recorded.
    pub last_event_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct IngestStats {
    accepted: AtomicU64,
    rejected: AtomicU64,
    skipped: AtomicU64,
    last_event_at: Mutex<Option<DateTime<Utc>>>,
}

/// Hands each score to every registered projection, in registration order.
pub struct Ingestor {
    projections: Vec<Arc<dyn ScoreProjection>>,
    clock: Arc<dyn Clock>,
    stats: IngestStats,
}

impl std::fmt::Debug for Ingestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.projections.iter().map(|p| p.name()).collect();
        f.debug_struct("Ingestor")
            .field("projections", &names)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Ingestor {
    /// Creates an ingestor over the given projections.
    #[must_use]
    pub fn new(projections: Vec<Arc<dyn ScoreProjection>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projections,
            clock,
            stats: IngestStats::default(),
        }
    }

    /// Records a validated score in every projection.
    pub fn ingest(&self, event: &ScoreEvent) {
        for projection in &self.projections {
            projection.record(event);
        }
        self.stats.accepted.fetch_add(1, Ordering::Relaxed);
        *self
            .stats
            .last_event_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(self.clock.now());
        trace!(
            student_id = event.student_id(),
            exam_id = event.exam_id(),
            "score ingested"
        );
    }

    /// Decodes a frame and records it if it is a valid score. Invalid
    /// scores are counted and dropped here; nothing is propagated.
    pub fn ingest_frame(&self, frame: &SseFrame) -> FrameOutcome {
        if frame.event != SCORE_EVENT_TYPE {
            self.stats.skipped.fetch_add(1, Ordering::Relaxed);
            return FrameOutcome::Skipped;
        }
        match parse_score(&frame.data) {
            Ok(event) => {
                self.ingest(&event);
                FrameOutcome::Accepted
            }
            Err(err) => {
                self.stats.rejected.fetch_add(1, Ordering::Relaxed);
                warn!(%err, data = %frame.data, "dropping score frame");
                FrameOutcome::Rejected
            }
        }
    }

    /// Current counters.
    pub fn status(&self) -> IngestStatus {
        IngestStatus {
            accepted: self.stats.accepted.load(Ordering::Relaxed),
            rejected: self.stats.rejected.load(Ordering::Relaxed),
            skipped: self.stats.skipped.load(Ordering::Relaxed),
            last_event_at: *self
                .stats
                .last_event_at
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use scoreboard_core::projection::ScoreProjection;
    use scoreboard_test_support::{FixedClock, RecordingProjection};

    use super::*;

    fn frame(event: &str, data: &str) -> SseFrame {
        SseFrame {
            event: event.to_owned(),
            data: data.to_owned(),
        }
    }

    fn ingestor_with(projections: Vec<Arc<dyn ScoreProjection>>) -> Ingestor {
        Ingestor::new(projections, Arc::new(FixedClock::reference()))
    }

    #[test]
    fn test_ingest_frame_fans_out_to_every_projection() {
        // Arrange
        let students = Arc::new(RecordingProjection::new());
        let exams = Arc::new(RecordingProjection::new());
        let projections: Vec<Arc<dyn ScoreProjection>> = vec![
            students.clone() as Arc<dyn ScoreProjection>,
            exams.clone() as Arc<dyn ScoreProjection>,
        ];
        let ingestor = ingestor_with(projections);

        // Act
        let outcome = ingestor.ingest_frame(&frame(
            "score",
            r#"{"studentId": "John.Doe", "exam": 1000, "score": 0.72}"#,
        ));

        // Assert
        assert_eq!(outcome, FrameOutcome::Accepted);
        for projection in [&students, &exams] {
            let seen = projection.recorded();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0].student_id(), "John.Doe");
            assert_eq!(seen[0].exam_id(), 1000);
        }
        let status = ingestor.status();
        assert_eq!(status.accepted, 1);
        assert_eq!(
            status.last_event_at,
            Some(FixedClock::reference().0)
        );
    }

    #[test]
    fn test_ingest_frame_drops_malformed_scores() {
        // Arrange
        let projection = Arc::new(RecordingProjection::new());
        let ingestor = ingestor_with(vec![projection.clone() as Arc<dyn ScoreProjection>]);

        // Act
        let outcomes = [
            ingestor.ingest_frame(&frame("score", "{not json")),
            ingestor.ingest_frame(&frame("score", r#"{"studentId": " ", "exam": 1, "score": 0.5}"#)),
        ];

        // Assert
        assert_eq!(outcomes, [FrameOutcome::Rejected, FrameOutcome::Rejected]);
        assert!(projection.recorded().is_empty());
        let status = ingestor.status();
        assert_eq!(status.rejected, 2);
        assert_eq!(status.accepted, 0);
        assert_eq!(status.last_event_at, None);
    }

    #[test]
    fn test_ingest_frame_skips_other_event_types() {
        let projection = Arc::new(RecordingProjection::new());
        let ingestor = ingestor_with(vec![projection.clone() as Arc<dyn ScoreProjection>]);

        let outcome = ingestor.ingest_frame(&frame(
            "heartbeat",
            r#"{"studentId": "John.Doe", "exam": 1, "score": 0.5}"#,
        ));

        assert_eq!(outcome, FrameOutcome::Skipped);
        assert!(projection.recorded().is_empty());
        assert_eq!(ingestor.status().skipped, 1);
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let ingestor = ingestor_with(Vec::new());

        let json = serde_json::to_value(ingestor.status()).unwrap();

        assert_eq!(json["accepted"], 0);
        assert!(json["lastEventAt"].is_null());
    }
}
